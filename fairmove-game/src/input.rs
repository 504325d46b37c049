/// One line of menu input, classified before any game logic sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Zero-based move index
    Move(usize),
    Exit,
    Help,
    Invalid,
}

impl MenuChoice {
    pub const EXIT_KEY: &'static str = "0";
    pub const HELP_KEY: &'static str = "?";

    /// Menu options are numbered `1..=move_count`; `0` exits and `?` asks
    /// for help.
    pub fn classify(line: &str, move_count: usize) -> Self {
        let line = line.trim();
        if line == Self::HELP_KEY {
            return MenuChoice::Help;
        }

        match line.parse::<usize>() {
            Ok(0) => MenuChoice::Exit,
            Ok(n) if n <= move_count => MenuChoice::Move(n - 1),
            _ => MenuChoice::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_moves() {
        assert_eq!(MenuChoice::classify("1", 3), MenuChoice::Move(0));
        assert_eq!(MenuChoice::classify(" 3\n", 3), MenuChoice::Move(2));
    }

    #[test]
    fn test_classify_exit_and_help() {
        assert_eq!(MenuChoice::classify("0", 3), MenuChoice::Exit);
        assert_eq!(MenuChoice::classify("?", 3), MenuChoice::Help);
        assert_eq!(MenuChoice::classify(" ? ", 3), MenuChoice::Help);
    }

    #[test]
    fn test_classify_invalid() {
        for line in ["4", "-1", "", "rock", "1.5", "??", "99999999999999999999999"] {
            assert_eq!(MenuChoice::classify(line, 3), MenuChoice::Invalid, "{:?}", line);
        }
    }
}
