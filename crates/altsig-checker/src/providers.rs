//! Collaborators supplied by the host.
//!
//! The checker performs no I/O of its own. Reading class files, resolving
//! which declarations override which, and turning annotation text into a
//! type tree all happen behind these traits. Every collaborator must be
//! shareable across the worker pool.

use altsig_solver::{AlternativeSignature, Declaration, OverrideEdge};

/// Raw declarations of one class and the override edges leaving it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassDeclarations {
    pub declarations: Vec<Declaration>,
    pub edges: Vec<OverrideEdge>,
}

/// Host reflection over compiled classes.
pub trait HostDeclarationProvider: Send + Sync {
    /// The class's binary unit: version header followed by its payload.
    ///
    /// `None` when the class does not exist.
    fn binary_unit(&self, class: &str) -> Option<Vec<u8>>;

    /// Declarations and override edges of a class whose unit passed the
    /// version gate.
    fn declarations(&self, class: &str) -> Option<ClassDeclarations>;
}

/// Retrieves the annotation payload attached to a declaration.
pub trait AlternativeSignatureSource: Send + Sync {
    fn alternative_text(&self, declaration: &Declaration) -> Option<String>;
}

/// Turns annotation text into a structured alternative signature.
pub trait SignatureTextParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<AlternativeSignature, ParseError>;
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The three collaborators a check needs, borrowed for its duration.
#[derive(Clone, Copy)]
pub struct Collaborators<'h> {
    pub declarations: &'h dyn HostDeclarationProvider,
    pub alternatives: &'h dyn AlternativeSignatureSource,
    pub parser: &'h dyn SignatureTextParser,
}

impl<'h> Collaborators<'h> {
    /// Use one host for declarations and alternatives.
    pub fn new<H>(host: &'h H, parser: &'h dyn SignatureTextParser) -> Self
    where
        H: HostDeclarationProvider + AlternativeSignatureSource,
    {
        Self {
            declarations: host,
            alternatives: host,
            parser,
        }
    }
}
