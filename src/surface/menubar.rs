use std::io::Write;

use crossterm::{cursor, queue, style, terminal};

use crate::config::KeyBindings;

use super::Screen;

/// Key hints for `screen`, in the order: navigation → action → escape/global.
pub fn screen_items(screen: Screen, bindings: &KeyBindings, topic_count: usize) -> Vec<String> {
    let mut items = match screen {
        Screen::Home => vec![format!("[{}] play", bindings.submit), "[q]uit".to_string()],
        Screen::Topic => vec![
            format!("[{}][{}] topic", bindings.move_up, bindings.move_down),
            format!("[1-{topic_count}] pick"),
            format!("[{}] choose", bindings.submit),
            format!("[{}] home", bindings.home),
        ],
        Screen::Game => vec![
            format!("[{}] submit", bindings.submit),
            format!("[{}] replay", bindings.replay),
            format!("[{}] clear", bindings.clear),
            format!("[{}] home", bindings.home),
        ],
        Screen::Congrats => vec![
            format!("[{}] play again", bindings.submit),
            format!("[{}] home", bindings.home),
        ],
    };
    items.push(format!("[{}] mute", bindings.mute));
    items.push(format!("[{}] quit", bindings.quit));
    items
}

pub fn render_menubar<W: Write>(out: &mut W, items: &[String]) -> anyhow::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            queue!(out, style::Print("  "))?;
        }
        print_menu_item(out, item)?;
    }
    Ok(())
}

/// Print a menu item string, bolding any text inside `[...]` brackets.
/// Text outside brackets is printed dim.
pub fn print_menu_item<W: Write>(out: &mut W, item: &str) -> anyhow::Result<()> {
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            queue!(
                out,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(rest),
                style::SetAttribute(style::Attribute::Reset),
            )?;
            break;
        };
        if open > 0 {
            queue!(
                out,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(&rest[..open]),
                style::SetAttribute(style::Attribute::Reset),
            )?;
        }
        rest = &rest[open..];
        let Some(close) = rest.find(']') else {
            queue!(out, style::Print(rest))?;
            break;
        };
        queue!(
            out,
            style::SetAttribute(style::Attribute::Bold),
            style::Print(&rest[..=close]),
            style::SetAttribute(style::Attribute::Reset),
        )?;
        rest = &rest[close + 1..];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_hints_use_configured_bindings() {
        let items = screen_items(Screen::Game, &KeyBindings::default(), 3);
        assert_eq!(
            items,
            [
                "[Enter] submit",
                "[Tab] replay",
                "[Ctrl-u] clear",
                "[Esc] home",
                "[F2] mute",
                "[Ctrl-c] quit",
            ]
        );
    }

    #[test]
    fn topic_hints_mention_digit_range() {
        let items = screen_items(Screen::Topic, &KeyBindings::default(), 3);
        assert!(items.contains(&"[1-3] pick".to_string()));
    }

    #[test]
    fn menu_item_keeps_all_text() {
        let mut out = Vec::new();
        print_menu_item(&mut out, "[Tab] replay [x").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[Tab]"));
        assert!(text.contains(" replay "));
        assert!(text.contains("[x"));
    }
}
