//! Keyboard mapping

use crate::sim::Direction;

/// Everything the player can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    Steer(Direction),
    Pause,
    Restart,
}

/// Map a `KeyboardEvent.key` value to a signal
pub fn signal_for_key(key: &str) -> Option<InputSignal> {
    let signal = match key {
        "ArrowUp" | "w" | "W" => InputSignal::Steer(Direction::Up),
        "ArrowDown" | "s" | "S" => InputSignal::Steer(Direction::Down),
        "ArrowLeft" | "a" | "A" => InputSignal::Steer(Direction::Left),
        "ArrowRight" | "d" | "D" => InputSignal::Steer(Direction::Right),
        " " | "p" | "P" | "Escape" => InputSignal::Pause,
        "r" | "R" | "Enter" => InputSignal::Restart,
        _ => return None,
    };
    Some(signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            signal_for_key("ArrowLeft"),
            Some(InputSignal::Steer(Direction::Left))
        );
        assert_eq!(signal_for_key("W"), Some(InputSignal::Steer(Direction::Up)));
        assert_eq!(signal_for_key(" "), Some(InputSignal::Pause));
        assert_eq!(signal_for_key("Enter"), Some(InputSignal::Restart));
        assert_eq!(signal_for_key("q"), None);
    }
}
