//! Header and inline adjacency rules
//!
//! Both predicates compare positions only; the comment's text plays no part.

use crate::position::Block;

/// Whether `comment` documents `block` from above.
///
/// Either the comment ends on the line right above the block and does not
/// start to the right of it, or it ends on the block's first line strictly
/// before the block's first token (`/* doc */ func f() {}`).
pub fn is_header(comment: &Block, block: &Block) -> bool {
    let above = block.start_line > 1
        && comment.end_line == block.start_line - 1
        && comment.start_column <= block.start_column;

    above || ends_before_block_on_first_line(comment, block)
}

/// Whether `comment` sits within the lines of `block`.
///
/// This covers trailing comments on the first and last lines as well as
/// anything nested in the body. A comment left of the block's first token is
/// a header, never inline.
pub fn is_inline(comment: &Block, block: &Block) -> bool {
    block.spans_lines_of(comment) && !ends_before_block_on_first_line(comment, block)
}

fn ends_before_block_on_first_line(comment: &Block, block: &Block) -> bool {
    comment.end_line == block.start_line && comment.end_column < block.start_column
}
