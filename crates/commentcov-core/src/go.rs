//! Go frontend
//!
//! Parses Go source with tree-sitter (via arborium) into a [`SourceFile`]:
//! the package clause, the top-level declarations with the blocks the
//! coverage engine classifies against, and the file's comment groups.
//!
//! Comments are grouped the way the Go parser groups them. A comment that
//! starts on the line where the previous token ends opens a group that only
//! takes comments starting on its own last line. Every other run of comments
//! is split wherever a blank line separates two comments.

use crate::comment::CommentGroup;
use crate::position::{Block, Position};
use crate::syntax::{Decl, Ident, PackageClause, SourceFile, TypeShape, TypeSpec};
use arborium::tree_sitter::{Node, Parser, Point};
use tracing::debug;

/// The source could not be parsed as a Go file
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{position}: {message}")]
pub struct ParseError {
    /// Position of the first error
    pub position: Position,
    pub message: String,
}

impl ParseError {
    fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Parse Go source into a [`SourceFile`].
///
/// Fails on the first syntax error and when the file has no package clause.
pub fn parse(source: &str) -> Result<SourceFile, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_go::language().into())
        .map_err(|e| ParseError::new(Position::new(1, 1), format!("failed to load Go grammar: {e}")))?;

    let Some(tree) = parser.parse(source, None) else {
        return Err(ParseError::new(Position::new(1, 1), "parser produced no tree"));
    };

    let root = tree.root_node();
    if root.has_error() {
        let error = first_error(source, root)
            .unwrap_or_else(|| ParseError::new(position(root.start_position()), "syntax error"));
        debug!(%error, "go source failed to parse");
        return Err(error);
    }

    let mut cursor = root.walk();
    let top_level: Vec<Node> = root
        .named_children(&mut cursor)
        .filter(|node| node.kind() != "comment")
        .collect();

    let package = match top_level.first() {
        Some(node) if node.kind() == "package_clause" => package_clause(source, *node)?,
        Some(node) => {
            return Err(ParseError::new(
                position(node.start_position()),
                format!("expected 'package', found {}", node.kind()),
            ));
        }
        None => {
            return Err(ParseError::new(
                position(root.end_position()),
                "expected 'package', found EOF",
            ));
        }
    };

    let decls: Vec<Decl> = top_level[1..]
        .iter()
        .map(|node| declaration(source, *node))
        .collect();

    let mut tokens = Vec::new();
    collect_tokens(source, root, &mut tokens);
    let comments = group_comments(&tokens);

    debug!(
        package = %package.name,
        decls = decls.len(),
        comment_groups = comments.len(),
        "parsed go source"
    );

    Ok(SourceFile {
        package,
        decls,
        comments,
    })
}

fn position(point: Point) -> Position {
    Position::new(point.row as u32 + 1, point.column as u32 + 1)
}

fn node_block(start: Node, end: Node) -> Block {
    Block::new(position(start.start_position()), position(end.end_position()))
}

fn text<'a>(source: &'a str, node: Node) -> &'a str {
    &source[node.byte_range()]
}

/// Depth-first search for the first ERROR or MISSING node
fn first_error(source: &str, node: Node) -> Option<ParseError> {
    if node.is_missing() {
        return Some(ParseError::new(
            position(node.start_position()),
            format!("missing {}", node.kind()),
        ));
    }
    if node.is_error() {
        let found = text(source, node).split_whitespace().next().unwrap_or("EOF");
        return Some(ParseError::new(
            position(node.start_position()),
            format!("syntax error: unexpected {found}"),
        ));
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(|child| first_error(source, child))
}

fn package_clause(source: &str, node: Node) -> Result<PackageClause, ParseError> {
    let mut cursor = node.walk();
    let name = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == "package_identifier")
        .map(|child| text(source, child).to_string())
        .ok_or_else(|| ParseError::new(position(node.end_position()), "expected package name"))?;

    Ok(PackageClause {
        name,
        position: position(node.start_position()),
    })
}

fn declaration(source: &str, node: Node) -> Decl {
    match node.kind() {
        "function_declaration" | "method_declaration" => match node.child_by_field_name("name") {
            Some(name) => Decl::Func(Ident::new(text(source, name), node_block(node, node))),
            None => Decl::Other,
        },
        "const_declaration" => Decl::Const(value_names(source, node, "const_spec")),
        "var_declaration" => Decl::Var(value_names(source, node, "var_spec")),
        "type_declaration" => Decl::Type(type_specs(source, node)),
        "import_declaration" => Decl::Import,
        _ => Decl::Other,
    }
}

/// Specs of a declaration, looking through `( ... )` spec lists
fn specs<'tree>(node: Node<'tree>, kinds: &[&str]) -> Vec<Node<'tree>> {
    let mut found = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if kinds.contains(&child.kind()) {
            found.push(child);
        } else if child.kind().ends_with("_spec_list") {
            found.extend(specs(child, kinds));
        }
    }
    found
}

/// Every name bound by a `var` or `const` declaration; each block is the
/// name itself
fn value_names(source: &str, node: Node, spec_kind: &str) -> Vec<Ident> {
    let mut names = Vec::new();
    for spec in specs(node, &[spec_kind]) {
        let mut cursor = spec.walk();
        // const_spec puts its `name` field on the whole comma list, so the
        // separators come back tagged too
        names.extend(
            spec.children_by_field_name("name", &mut cursor)
                .filter(|name| name.is_named())
                .map(|name| Ident::new(text(source, name), node_block(name, name))),
        );
    }
    names
}

fn type_specs(source: &str, node: Node) -> Vec<TypeSpec> {
    specs(node, &["type_spec", "type_alias"])
        .into_iter()
        .filter_map(|spec| {
            let name = spec.child_by_field_name("name")?;
            let ty = spec.child_by_field_name("type")?;
            Some(TypeSpec {
                ident: Ident::new(text(source, name), node_block(name, ty)),
                shape: type_shape(ty),
            })
        })
        .collect()
}

fn type_shape(node: Node) -> TypeShape {
    match node.kind() {
        "struct_type" => TypeShape::Struct,
        "interface_type" => TypeShape::Interface,
        "array_type" | "implicit_length_array_type" => TypeShape::Array,
        "slice_type" => TypeShape::Slice,
        "map_type" => TypeShape::Map,
        "channel_type" => TypeShape::Channel,
        "function_type" => TypeShape::Function,
        "pointer_type" => TypeShape::Pointer,
        "type_identifier" | "qualified_type" | "generic_type" => TypeShape::Named,
        "parenthesized_type" => node
            .named_child(0)
            .map(type_shape)
            .unwrap_or(TypeShape::Other),
        _ => TypeShape::Other,
    }
}

/// A leaf of the syntax tree, as the Go scanner would see it
#[derive(Debug, Clone, Copy)]
enum Token<'a> {
    Code { end_line: u32 },
    Comment { text: &'a str, block: Block },
}

fn collect_tokens<'a>(source: &'a str, node: Node, tokens: &mut Vec<Token<'a>>) {
    if node.kind() == "comment" {
        tokens.push(Token::Comment {
            text: text(source, node),
            block: node_block(node, node),
        });
        return;
    }

    if node.child_count() == 0 {
        // Newline terminators and zero-width nodes are not tokens
        if !node.is_missing() && !text(source, node).trim().is_empty() {
            tokens.push(Token::Code {
                end_line: position(node.end_position()).line,
            });
        }
        return;
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    for child in children {
        collect_tokens(source, child, tokens);
    }
}

fn group_comments(tokens: &[Token]) -> Vec<CommentGroup> {
    let mut groups = Vec::new();
    let mut previous_line = None;
    let mut run: Vec<(&str, Block)> = Vec::new();

    for token in tokens {
        match *token {
            Token::Comment { text, block } => run.push((text, block)),
            Token::Code { end_line } => {
                group_run(&run, previous_line, &mut groups);
                run.clear();
                previous_line = Some(end_line);
            }
        }
    }
    group_run(&run, previous_line, &mut groups);

    groups
}

/// Split one run of consecutive comments into groups
fn group_run(run: &[(&str, Block)], previous_line: Option<u32>, groups: &mut Vec<CommentGroup>) {
    let mut rest = run;

    if let (Some(line), Some((_, first))) = (previous_line, run.first()) {
        if first.start_line == line {
            let len = group_len(rest, 0);
            groups.push(build_group(&rest[..len]));
            rest = &rest[len..];
        }
    }

    while !rest.is_empty() {
        let len = group_len(rest, 1);
        groups.push(build_group(&rest[..len]));
        rest = &rest[len..];
    }
}

/// How many leading comments of `run` belong to one group, allowing `gap`
/// lines between the end of the group and the start of the next comment
fn group_len(run: &[(&str, Block)], gap: u32) -> usize {
    let mut end_line = match run.first() {
        Some((_, block)) => block.start_line,
        None => return 0,
    };

    let mut len = 0;
    for (_, block) in run {
        if block.start_line > end_line + gap {
            break;
        }
        end_line = block.end_line;
        len += 1;
    }
    len
}

fn build_group(comments: &[(&str, Block)]) -> CommentGroup {
    let start = comments.first().map(|(_, block)| block.start());
    let end = comments.last().map(|(_, block)| block.end());
    let block = match (start, end) {
        (Some(start), Some(end)) => Block::new(start, end),
        _ => Block::point(Position::new(1, 1)),
    };
    CommentGroup::from_raw(comments.iter().map(|(text, _)| *text), block)
}
