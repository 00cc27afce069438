use crate::config::ComposeConfig;
use crate::types::Mesostic;

/// Render a composition to text.
///
/// With `align_marks`, every line is left-padded so its first mark lands at
/// one fixed column (the widest first-mark offset in the composition), which
/// spells the spine vertically. Marked columns are uppercased when
/// `uppercase_marks` is set; all other characters keep their original casing.
pub(crate) fn render(mesostic: &Mesostic, config: &ComposeConfig) -> String {
    let align_col = if config.align_marks {
        mesostic
            .lines
            .iter()
            .map(|line| line.first_column())
            .max()
            .unwrap_or(0)
    } else {
        0
    };

    let mut out = String::new();
    for line in &mesostic.lines {
        let indent = config.left_margin + align_col.saturating_sub(line.first_column());
        for _ in 0..indent {
            out.push(' ');
        }
        for (idx, ch) in line.text.chars().enumerate() {
            if config.uppercase_marks && line.columns.binary_search(&idx).is_ok() {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::compose::compose;
    use crate::config::ComposeConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_marks_are_uppercased() {
        let poem = compose("road\nmist\nplain", "RIP").unwrap();
        let text = poem.render(&ComposeConfig {
            align_marks: false,
            ..ComposeConfig::default()
        });
        assert_eq!(text, "Road\nmIst\nPlain\n");
    }

    #[test]
    fn test_first_marks_align() {
        let poem = compose("road\nmist\nplain", "RIP").unwrap();
        let text = poem.render(&ComposeConfig::default());
        assert_eq!(text, " Road\nmIst\n Plain\n");
        let mark_cols: Vec<usize> = text
            .lines()
            .map(|line| {
                line.chars()
                    .position(|ch| ch.is_uppercase())
                    .expect("each line carries a mark")
            })
            .collect();
        assert_eq!(mark_cols, vec![1, 1, 1]);
    }

    #[test]
    fn test_plain_render_preserves_source() {
        let poem = compose("RiVeR\nplain", "rp").unwrap();
        let text = poem.render(&ComposeConfig::plain());
        assert_eq!(text, "RiVeR\nplain\n");
    }

    #[test]
    fn test_left_margin_indents_every_line() {
        let poem = compose("ab\nba", "ab").unwrap();
        let config = ComposeConfig {
            left_margin: 2,
            ..ComposeConfig::plain()
        };
        let text = poem.render(&config);
        for line in text.lines() {
            assert!(line.starts_with("  "));
        }
    }

    #[test]
    fn test_same_line_renders_once_with_both_marks() {
        let poem = compose("parallel", "PA").unwrap();
        let text = poem.render(&ComposeConfig {
            align_marks: false,
            ..ComposeConfig::default()
        });
        assert_eq!(text, "PArallel\n");
    }

    #[test]
    fn test_display_uses_default_config() {
        let poem = compose("parallel", "PA").unwrap();
        assert_eq!(poem.to_string(), poem.render(&ComposeConfig::default()));
    }
}
