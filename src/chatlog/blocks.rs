//! Splits chat messages into paragraph-sized blocks for the Notion page
//! body.

/// Character budget for one paragraph block.
pub const BLOCK_CHAR_LIMIT: usize = 1500;

/// Split `text` into blocks on newlines, keeping each block under
/// [`BLOCK_CHAR_LIMIT`] characters (not bytes, so multi-byte text fills a
/// block as far as ASCII does). A `#`-prefixed heading line always starts a
/// new block, so a block boundary never lands inside a heading.
#[must_use]
pub fn split_text_into_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for line in text.split('\n') {
        let line_chars = line.chars().count();
        let starts_heading = line.trim_start().starts_with('#');
        let overflows = current_chars + line_chars + 1 > BLOCK_CHAR_LIMIT;

        if starts_heading || overflows {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            current = line.to_string();
            current_chars = line_chars;
        } else if current.is_empty() {
            current = line.to_string();
            current_chars = line_chars;
        } else {
            current.push('\n');
            current.push_str(line);
            current_chars += line_chars + 1;
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_stays_in_one_block() {
        assert_eq!(split_text_into_blocks("one\ntwo"), vec!["one\ntwo"]);
    }

    #[test]
    fn empty_text_yields_no_blocks() {
        assert!(split_text_into_blocks("").is_empty());
    }

    #[test]
    fn headings_start_new_blocks() {
        let blocks = split_text_into_blocks("intro\n# section\nbody");
        assert_eq!(blocks, vec!["intro", "# section\nbody"]);
    }

    #[test]
    fn long_messages_split_near_the_limit_without_breaking_headings() {
        let filler = "x".repeat(450);
        let mut text = String::new();
        for index in 0..7 {
            if index == 2 || index == 5 {
                text.push_str(&format!("# heading {index}\n"));
            }
            text.push_str(&filler);
            text.push('\n');
        }
        assert!(text.len() >= 3000);

        let blocks = split_text_into_blocks(&text);
        assert!(blocks.len() >= 2);
        for block in &blocks {
            assert!(block.len() <= BLOCK_CHAR_LIMIT + filler.len());
            for (offset, line) in block.split('\n').enumerate() {
                if line.starts_with('#') {
                    // A heading may only appear as the first line of a block.
                    assert_eq!(offset, 0, "heading split off its block start");
                }
            }
        }
    }

    #[test]
    fn block_budget_counts_characters_not_bytes() {
        // Two 600-character CJK lines fit one block by character count even
        // though they blow past the budget in bytes.
        let line = "中".repeat(600);
        let blocks = split_text_into_blocks(&format!("{line}\n{line}"));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].chars().count(), 1201);
    }

    #[test]
    fn oversized_single_line_becomes_its_own_block() {
        let long = "y".repeat(2000);
        let blocks = split_text_into_blocks(&format!("before\n{long}\nafter"));
        assert_eq!(blocks, vec!["before".to_string(), long, "after".to_string()]);
    }
}
