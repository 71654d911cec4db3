//! Parsed representation of a Go source file
//!
//! This is what the coverage engine reads: the package clause, the top-level
//! declarations in document order, and every comment group in the file. The
//! [`go`](crate::go) frontend builds it; tests can build it by hand.

use crate::comment::CommentGroup;
use crate::position::{Block, Position};

/// One parsed source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package: PackageClause,
    /// Top-level declarations in document order
    pub decls: Vec<Decl>,
    /// Every comment group in the file, in file order
    pub comments: Vec<CommentGroup>,
}

/// The `package name` clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageClause {
    pub name: String,
    /// Position of the `package` keyword
    pub position: Position,
}

/// A name together with the span the engine classifies against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub block: Block,
}

impl Ident {
    pub fn new(name: impl Into<String>, block: Block) -> Self {
        Self {
            name: name.into(),
            block,
        }
    }
}

/// A top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// A function or method; the block runs from `func` to the end of the body
    Func(Ident),
    /// A `const` declaration or group; one block per bound name
    Const(Vec<Ident>),
    /// A `var` declaration or group; one block per bound name
    Var(Vec<Ident>),
    /// A `type` declaration or group
    Type(Vec<TypeSpec>),
    Import,
    Other,
}

/// One named type in a `type` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    /// The type name; the block spans from the name to the end of the type
    pub ident: Ident,
    pub shape: TypeShape,
}

/// The shape of a declared type's underlying type expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    Struct,
    Interface,
    Array,
    Slice,
    Map,
    Channel,
    Function,
    Pointer,
    /// A named type, possibly qualified or instantiated (`int`, `io.Reader`, `List[T]`)
    Named,
    /// Anything else the grammar produces
    Other,
}

impl TypeShape {
    /// Structured aggregates (record-like or interface-like)
    pub fn is_aggregate(self) -> bool {
        matches!(self, TypeShape::Struct | TypeShape::Interface)
    }
}
