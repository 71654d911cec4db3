//! Comment coverage classification
//!
//! Every documentable entity of a [`SourceFile`] becomes one [`CoverageItem`]:
//! the package itself, each function or method, each name bound by `var` or
//! `const`, and each named type. Every entity scans the full comment list of
//! its file with [`is_header`] and [`is_inline`]; scans are independent, so one
//! comment group may show up in several items (a struct's inline list and a
//! field's own header, for instance).

use crate::comment::CommentGroup;
use crate::position::Block;
use crate::predicate::{is_header, is_inline};
use crate::syntax::{Decl, Ident, SourceFile, TypeSpec};
use facet::Facet;
use tracing::debug;

/// Visibility and kind of a documentable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Facet)]
#[facet(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Scope {
    /// The file, identified by its package name
    File,
    PublicFunction,
    PrivateFunction,
    /// Variables and constants alike
    PublicVariable,
    PrivateVariable,
    /// Aliases, named types, arrays, slices, maps, channels, function types...
    PublicType,
    PrivateType,
    /// Structs and interfaces
    PublicClass,
    PrivateClass,
}

impl Scope {
    /// Get the string representation of this scope
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::File => "FILE",
            Scope::PublicFunction => "PUBLIC_FUNCTION",
            Scope::PrivateFunction => "PRIVATE_FUNCTION",
            Scope::PublicVariable => "PUBLIC_VARIABLE",
            Scope::PrivateVariable => "PRIVATE_VARIABLE",
            Scope::PublicType => "PUBLIC_TYPE",
            Scope::PrivateType => "PRIVATE_TYPE",
            Scope::PublicClass => "PUBLIC_CLASS",
            Scope::PrivateClass => "PRIVATE_CLASS",
        }
    }

    pub fn function(identifier: &str) -> Self {
        if is_exported(identifier) {
            Scope::PublicFunction
        } else {
            Scope::PrivateFunction
        }
    }

    pub fn variable(identifier: &str) -> Self {
        if is_exported(identifier) {
            Scope::PublicVariable
        } else {
            Scope::PrivateVariable
        }
    }

    /// Scope of a named type; aggregates (structs, interfaces) are classes
    pub fn type_spec(identifier: &str, aggregate: bool) -> Self {
        match (aggregate, is_exported(identifier)) {
            (true, true) => Scope::PublicClass,
            (true, false) => Scope::PrivateClass,
            (false, true) => Scope::PublicType,
            (false, false) => Scope::PrivateType,
        }
    }

    /// Whether this is one of the `PUBLIC_*` scopes
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Scope::PublicFunction | Scope::PublicVariable | Scope::PublicType | Scope::PublicClass
        )
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Go's exported-name rule: the first character is an uppercase letter
pub fn is_exported(identifier: &str) -> bool {
    identifier.chars().next().is_some_and(char::is_uppercase)
}

/// Coverage of one documentable entity
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
#[facet(rename_all = "camelCase")]
pub struct CoverageItem {
    pub scope: Scope,
    /// The entity's own span
    pub target_block: Block,
    /// Path of the file, as given by the caller
    pub file: String,
    /// Entity name (the package name for [`Scope::File`])
    pub identifier: String,
    /// File extension including the dot, e.g. `.go`
    pub extension: String,
    /// Comment groups right above the entity, in file order
    pub header_comments: Vec<CommentGroup>,
    /// Comment groups within the entity's lines, in file order
    pub inline_comments: Vec<CommentGroup>,
}

impl CoverageItem {
    /// Whether any comment documents this entity
    pub fn is_documented(&self) -> bool {
        !self.header_comments.is_empty() || !self.inline_comments.is_empty()
    }
}

/// Knobs for a coverage measurement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasureOptions {
    /// Keep comment groups that hold only a `nolint:` annotation or only
    /// directives. They are skipped by default.
    pub keep_lint_annotations: bool,
}

/// Per-file state shared by all extraction routines
struct Extractor<'a> {
    file: &'a str,
    extension: &'a str,
    comments: Vec<&'a CommentGroup>,
}

impl<'a> Extractor<'a> {
    fn new(file: &'a str, source: &'a SourceFile, options: &MeasureOptions) -> Self {
        let comments = source
            .comments
            .iter()
            .filter(|group| options.keep_lint_annotations || group.is_documentation())
            .collect();

        Self {
            file,
            extension: extension(file),
            comments,
        }
    }

    fn item(&self, scope: Scope, identifier: &str, block: Block) -> CoverageItem {
        let mut header_comments = Vec::new();
        let mut inline_comments = Vec::new();

        for group in &self.comments {
            if is_header(&group.block, &block) {
                header_comments.push((*group).clone());
            }
            if is_inline(&group.block, &block) {
                inline_comments.push((*group).clone());
            }
        }

        CoverageItem {
            scope,
            target_block: block,
            file: self.file.to_string(),
            identifier: identifier.to_string(),
            extension: self.extension.to_string(),
            header_comments,
            inline_comments,
        }
    }

    fn package(&self, source: &SourceFile) -> CoverageItem {
        let block = Block::point(source.package.position);
        self.item(Scope::File, &source.package.name, block)
    }

    fn function(&self, func: &Ident) -> CoverageItem {
        self.item(Scope::function(&func.name), &func.name, func.block)
    }

    fn values(&self, names: &[Ident]) -> Vec<CoverageItem> {
        names
            .iter()
            .map(|name| self.item(Scope::variable(&name.name), &name.name, name.block))
            .collect()
    }

    fn types(&self, specs: &[TypeSpec]) -> Vec<CoverageItem> {
        specs
            .iter()
            .map(|spec| {
                let scope = Scope::type_spec(&spec.ident.name, spec.shape.is_aggregate());
                self.item(scope, &spec.ident.name, spec.ident.block)
            })
            .collect()
    }
}

/// Coverage of the whole file: the package item first, then every
/// top-level entity in document order.
pub fn file_coverage(file: &str, source: &SourceFile, options: &MeasureOptions) -> Vec<CoverageItem> {
    let extractor = Extractor::new(file, source, options);
    let mut items = vec![extractor.package(source)];

    for decl in &source.decls {
        match decl {
            Decl::Func(func) => items.push(extractor.function(func)),
            Decl::Const(names) | Decl::Var(names) => items.extend(extractor.values(names)),
            Decl::Type(specs) => items.extend(extractor.types(specs)),
            Decl::Import | Decl::Other => {}
        }
    }

    debug!(
        file,
        items = items.len(),
        comments = extractor.comments.len(),
        "classified comment coverage"
    );

    items
}

/// Package level coverage; the block is the point at the `package` keyword
pub fn package_coverage(file: &str, source: &SourceFile, options: &MeasureOptions) -> CoverageItem {
    Extractor::new(file, source, options).package(source)
}

/// Coverage of one function or method
pub fn function_coverage(
    file: &str,
    source: &SourceFile,
    func: &Ident,
    options: &MeasureOptions,
) -> CoverageItem {
    Extractor::new(file, source, options).function(func)
}

/// Coverage of each name bound by a `var` or `const` declaration
pub fn value_coverage(
    file: &str,
    source: &SourceFile,
    names: &[Ident],
    options: &MeasureOptions,
) -> Vec<CoverageItem> {
    Extractor::new(file, source, options).values(names)
}

/// Coverage of each named type of a `type` declaration
pub fn type_coverage(
    file: &str,
    source: &SourceFile,
    specs: &[TypeSpec],
    options: &MeasureOptions,
) -> Vec<CoverageItem> {
    Extractor::new(file, source, options).types(specs)
}

/// The extension of the last path element, dot included (`""` if none)
fn extension(file: &str) -> &str {
    for (i, c) in file.char_indices().rev() {
        if std::path::is_separator(c) {
            break;
        }
        if c == '.' {
            return &file[i..];
        }
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::syntax::{PackageClause, TypeShape};

    fn block(sl: u32, sc: u32, el: u32, ec: u32) -> Block {
        Block::new(Position::new(sl, sc), Position::new(el, ec))
    }

    fn group(text: &str, sl: u32, sc: u32, el: u32, ec: u32) -> CommentGroup {
        CommentGroup::new(text, block(sl, sc, el, ec))
    }

    fn source(decls: Vec<Decl>, comments: Vec<CommentGroup>) -> SourceFile {
        SourceFile {
            package: PackageClause {
                name: "hoge".to_string(),
                position: Position::new(1, 1),
            },
            decls,
            comments,
        }
    }

    #[test]
    fn test_is_exported() {
        assert!(is_exported("MyFunc"));
        assert!(is_exported("Ärger"));
        assert!(!is_exported("myFunc"));
        assert!(!is_exported("_"));
        assert!(!is_exported("_Hidden"));
        assert!(!is_exported(""));
    }

    #[test]
    fn test_type_scopes() {
        assert_eq!(Scope::type_spec("MyStruct", true), Scope::PublicClass);
        assert_eq!(Scope::type_spec("myStruct", true), Scope::PrivateClass);
        assert_eq!(Scope::type_spec("MyType", false), Scope::PublicType);
        assert_eq!(Scope::type_spec("myType", false), Scope::PrivateType);
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("hoge.go"), ".go");
        assert_eq!(extension("pkg/sub/hoge_test.go"), ".go");
        assert_eq!(extension("pkg.v2/Makefile"), "");
        assert_eq!(extension("archive.tar.gz"), ".gz");
        assert_eq!(extension(""), "");
    }

    #[test]
    fn test_file_item_comes_first() {
        let src = source(
            vec![Decl::Func(Ident::new("MyFunc", block(3, 1, 5, 2)))],
            vec![group("hoge Inline\n", 1, 14, 1, 28)],
        );
        let items = file_coverage("hoge.go", &src, &MeasureOptions::default());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].scope, Scope::File);
        assert_eq!(items[0].identifier, "hoge");
        assert_eq!(items[0].target_block, Block::point(Position::new(1, 1)));
        assert_eq!(items[0].extension, ".go");
        assert_eq!(items[0].inline_comments.len(), 1);
        assert_eq!(items[1].scope, Scope::PublicFunction);
    }

    #[test]
    fn test_imports_and_other_are_skipped() {
        let src = source(vec![Decl::Import, Decl::Other], Vec::new());
        let items = file_coverage("hoge.go", &src, &MeasureOptions::default());
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_value_group_unrolled_per_name() {
        let names = vec![
            Ident::new("MyConst", block(4, 5, 4, 12)),
            Ident::new("myConst", block(6, 5, 6, 12)),
        ];
        let comments = vec![
            group("MyConst Header\n", 3, 5, 3, 22),
            group("between\n", 5, 5, 5, 15),
        ];
        let src = source(vec![Decl::Const(names.clone())], comments);
        let items = value_coverage("hoge.go", &src, &names, &MeasureOptions::default());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].scope, Scope::PublicVariable);
        assert_eq!(items[0].header_comments[0].comment, "MyConst Header\n");
        assert_eq!(items[1].scope, Scope::PrivateVariable);
        assert_eq!(items[1].header_comments[0].comment, "between\n");
    }

    #[test]
    fn test_type_items() {
        let specs = vec![
            TypeSpec {
                ident: Ident::new("MyStruct", block(3, 6, 6, 2)),
                shape: TypeShape::Struct,
            },
            TypeSpec {
                ident: Ident::new("myType", block(8, 6, 8, 29)),
                shape: TypeShape::Map,
            },
            TypeSpec {
                ident: Ident::new("MyInt", block(9, 6, 9, 15)),
                shape: TypeShape::Named,
            },
        ];
        let src = source(vec![Decl::Type(specs.clone())], Vec::new());
        let scopes: Vec<Scope> = type_coverage("hoge.go", &src, &specs, &MeasureOptions::default())
            .iter()
            .map(|item| item.scope)
            .collect();

        assert_eq!(
            scopes,
            vec![Scope::PublicClass, Scope::PrivateType, Scope::PublicType]
        );
    }

    #[test]
    fn test_lint_annotation_filter() {
        let func = Ident::new("MyFunc", block(4, 1, 6, 2));
        let src = source(
            vec![Decl::Func(func.clone())],
            vec![group("nolint:funlen\n", 3, 1, 3, 18)],
        );

        let filtered = function_coverage("hoge.go", &src, &func, &MeasureOptions::default());
        assert!(filtered.header_comments.is_empty());
        assert!(!filtered.is_documented());

        let kept = function_coverage(
            "hoge.go",
            &src,
            &func,
            &MeasureOptions {
                keep_lint_annotations: true,
            },
        );
        assert_eq!(kept.header_comments.len(), 1);
    }

    #[test]
    fn test_package_coverage() {
        let src = source(
            Vec::new(),
            vec![
                group("Out of hoge\n", 2, 1, 2, 15),
                group("hoge Inline\n", 1, 14, 1, 28),
            ],
        );
        let item = package_coverage("hoge.go", &src, &MeasureOptions::default());
        assert!(item.header_comments.is_empty());
        assert_eq!(item.inline_comments.len(), 1);
        assert_eq!(item.inline_comments[0].comment, "hoge Inline\n");
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::PublicFunction.to_string(), "PUBLIC_FUNCTION");
        assert!(Scope::PublicClass.is_public());
        assert!(!Scope::File.is_public());
    }
}
