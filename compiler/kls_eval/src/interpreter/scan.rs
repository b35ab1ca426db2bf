//! Forward balanced scan for block statements.
//!
//! Blocks are found textually: hop from one `;` to the next (skipping any
//! inside `#` comments), classify the keyword that follows, and count
//! nested openers against closers. There is no parse tree, so the scan runs
//! again every time a block is entered.

use super::cursor::{Leading, ScriptCursor};
use super::keyword::Keyword;
use crate::ScriptError;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Block {
    If,
    While,
    Define,
}

impl Block {
    fn opener(self) -> Keyword {
        match self {
            Block::If => Keyword::If,
            Block::While => Keyword::While,
            Block::Define => Keyword::Define,
        }
    }

    fn closer(self) -> Keyword {
        match self {
            Block::If => Keyword::Fi,
            Block::While => Keyword::Done,
            Block::Define => Keyword::End,
        }
    }

    fn unclosed(self) -> ScriptError {
        match self {
            Block::If => ScriptError::ExpectedEndif,
            Block::While => ScriptError::ExpectedDone,
            Block::Define => ScriptError::ExpectedEnd,
        }
    }
}

/// Landmarks of a block, as byte offsets into the script.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct BlockScan {
    /// Just after the closing keyword, where its `;` is expected.
    pub close: usize,
    /// Just after the first same-level `else` keyword (`if` blocks only).
    pub alternate: Option<usize>,
    /// Start of the closing statement; the body ends here.
    pub body_end: usize,
}

/// Scan forward from the cursor, which must sit on the `;` ending the
/// block header. Leaves the cursor at [`BlockScan::close`].
pub(crate) fn scan_block(cursor: &mut ScriptCursor<'_>, block: Block) -> Result<BlockScan, ScriptError> {
    let mut depth = 1usize;
    let mut alternate = None;

    loop {
        let Some(semicolon) = cursor.next_terminator(cursor.pos()) else {
            return Err(block.unclosed());
        };
        let statement = semicolon + 1;
        cursor.set_pos(statement);

        let Leading::Keyword(keyword) = cursor.read_keyword() else {
            continue;
        };
        if keyword == block.opener() {
            depth += 1;
        } else if keyword == block.closer() {
            depth -= 1;
            if depth == 0 {
                return Ok(BlockScan {
                    close: cursor.pos(),
                    alternate,
                    body_end: statement,
                });
            }
        } else if block == Block::If && keyword == Keyword::Else && depth == 1 && alternate.is_none() {
            alternate = Some(cursor.pos());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(source: &str, header_end: usize, block: Block) -> Result<BlockScan, ScriptError> {
        let mut cursor = ScriptCursor::new(source);
        cursor.set_pos(header_end);
        scan_block(&mut cursor, block)
    }

    #[test]
    fn test_if_with_else() {
        let source = "if x; set r 1; else; set r 2; fi;";
        let header = source.find(';').unwrap_or_default();
        let found = scan(source, header, Block::If);
        assert_eq!(
            found,
            Ok(BlockScan {
                close: source.rfind(';').unwrap_or_default(),
                alternate: source.find("else;").map(|i| i + 4),
                body_end: source.find(" fi;").unwrap_or_default(),
            })
        );
    }

    #[test]
    fn test_nested_blocks_are_skipped() {
        let source = "if a; if b; else; fi; else; fi;";
        let found = scan(source, 4, Block::If);
        // the outer else, not the nested one
        let outer_else = source.rfind("else;").map(|i| i + 4);
        assert_eq!(found.map(|s| s.alternate), Ok(outer_else));
    }

    #[test]
    fn test_first_same_level_else_wins() {
        let source = "if a; else; else; fi;";
        let found = scan(source, 4, Block::If);
        assert_eq!(found.map(|s| s.alternate), Ok(Some(10)));
    }

    #[test]
    fn test_unclosed_blocks() {
        assert_eq!(scan("if 1; set r 1;", 4, Block::If), Err(ScriptError::ExpectedEndif));
        assert_eq!(scan("while 1; set r 1;", 7, Block::While), Err(ScriptError::ExpectedDone));
        assert_eq!(scan("define f; exit;", 8, Block::Define), Err(ScriptError::ExpectedEnd));
    }

    #[test]
    fn test_define_sees_first_body_statement() {
        // a nested define as the first statement must be counted
        let source = "define f; define g; exit; end; end;";
        let found = scan(source, 8, Block::Define);
        assert_eq!(found.map(|s| s.close), Ok(source.len() - 1));
    }

    #[test]
    fn test_semicolons_in_comments_are_not_boundaries() {
        let source = "if 0;\n set r 1 # note; fi;\n ;\nfi;";
        let found = scan(source, 4, Block::If);
        assert_eq!(found.map(|s| s.close), Ok(source.len() - 1));
    }

    #[test]
    fn test_empty_define_body() {
        let source = "define f; end;";
        let found = scan(source, 8, Block::Define);
        assert_eq!(found.map(|s| s.body_end), Ok(9));
    }
}
