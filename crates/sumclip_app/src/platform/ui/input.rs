use sumclip_core::{tabs_for, MenuCategory, Tab};

pub const HELP: &str = "commands: menu <summary|infographic|response> | tab <number|name> | reset | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Menu(MenuCategory),
    Tab(TabRef),
    Reset,
    Help,
    Quit,
}

/// A tab as typed by the user, resolved against the current menu later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabRef {
    /// 1-based position on the tab strip.
    Index(usize),
    Name(String),
}

impl TabRef {
    pub fn resolve(&self, menu: MenuCategory) -> Option<Tab> {
        let tabs = tabs_for(menu);
        match self {
            TabRef::Index(index) => index.checked_sub(1).and_then(|i| tabs.get(i)).copied(),
            TabRef::Name(name) => tabs
                .iter()
                .find(|tab| tab.ident().eq_ignore_ascii_case(name) || tab.label() == name)
                .copied(),
        }
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word.to_ascii_lowercase().as_str() {
        "menu" | "m" => parse_menu(rest).map(Command::Menu),
        "tab" | "t" => {
            if rest.is_empty() {
                return Err("tab needs a number or a name".to_string());
            }
            Ok(Command::Tab(match rest.parse::<usize>() {
                Ok(index) => TabRef::Index(index),
                Err(_) => TabRef::Name(rest.to_string()),
            }))
        }
        "reset" => Ok(Command::Reset),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "" => Err(HELP.to_string()),
        other => Err(format!("unknown command '{other}'; {HELP}")),
    }
}

fn parse_menu(name: &str) -> Result<MenuCategory, String> {
    MenuCategory::ALL
        .into_iter()
        .find(|menu| menu.label().eq_ignore_ascii_case(name))
        .ok_or_else(|| format!("unknown menu '{name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_case_insensitively() {
        assert_eq!(
            parse_command("menu INFOGRAPHIC"),
            Ok(Command::Menu(MenuCategory::Infographic))
        );
        assert!(parse_command("menu settings").is_err());
    }

    #[test]
    fn parses_tab_by_index_or_name() {
        assert_eq!(parse_command("tab 2"), Ok(Command::Tab(TabRef::Index(2))));
        assert_eq!(
            parse_command("t 핵심 내용"),
            Ok(Command::Tab(TabRef::Name("핵심 내용".to_string())))
        );
        assert!(parse_command("tab").is_err());
    }

    #[test]
    fn tab_refs_resolve_within_current_menu() {
        assert_eq!(
            TabRef::Index(2).resolve(MenuCategory::Summary),
            Some(Tab::CoreSummary)
        );
        assert_eq!(TabRef::Index(0).resolve(MenuCategory::Summary), None);
        assert_eq!(
            TabRef::Name("sankey".into()).resolve(MenuCategory::Infographic),
            Some(Tab::Sankey)
        );
        assert_eq!(
            TabRef::Name("트리".into()).resolve(MenuCategory::Infographic),
            Some(Tab::TreeMap)
        );
        assert_eq!(TabRef::Name("sankey".into()).resolve(MenuCategory::Summary), None);
        assert_eq!(TabRef::Index(1).resolve(MenuCategory::Response), None);
    }

    #[test]
    fn unknown_words_report_help() {
        let err = parse_command("summarize").unwrap_err();
        assert!(err.contains("unknown command"));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }
}
