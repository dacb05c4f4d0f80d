use midway::notation::{format_coordinate, parse_command, parse_coordinate, Command, NotationError};
use midway::SpecialAttack;

#[test]
fn test_pair_notation() {
    assert_eq!(parse_coordinate("3,4"), Ok((3, 4)));
    assert_eq!(parse_coordinate("  0 , 9 "), Ok((0, 9)));
    assert_eq!(parse_coordinate("12,40"), Ok((12, 40)));
    assert_eq!(parse_coordinate("3,"), Err(NotationError::Malformed));
    assert_eq!(parse_coordinate("-1,2"), Err(NotationError::Malformed));
}

#[test]
fn test_letter_notation() {
    assert_eq!(parse_coordinate("A5"), Ok((0, 5)));
    assert_eq!(parse_coordinate("j0"), Ok((9, 0)));
    assert_eq!(parse_coordinate("c 7"), Ok((2, 7)));
    assert_eq!(parse_coordinate("B10"), Ok((1, 10)));
    assert_eq!(parse_coordinate("K1"), Err(NotationError::Malformed));
    assert_eq!(parse_coordinate("A11"), Err(NotationError::Malformed));
    assert_eq!(parse_coordinate("A"), Err(NotationError::Malformed));
    assert_eq!(parse_coordinate("   "), Err(NotationError::Empty));
}

#[test]
fn test_commands() {
    assert_eq!(parse_command(" q "), Ok(Command::Quit));
    assert_eq!(parse_command("Q"), Ok(Command::Quit));
    assert_eq!(parse_command("D4"), Ok(Command::Attack((3, 4))));
    assert_eq!(
        parse_command("focus A5"),
        Ok(Command::Special(SpecialAttack::FocusedStrike, (0, 5)))
    );
    assert_eq!(
        parse_command("WIDE 2,2"),
        Ok(Command::Special(SpecialAttack::WideStrike, (2, 2)))
    );
    assert_eq!(parse_command("wide"), Err(NotationError::Malformed));
    assert_eq!(parse_command("fire A5"), Err(NotationError::Malformed));
}

#[test]
fn test_format_coordinate() {
    assert_eq!(format_coordinate((0, 5)), "A5");
    assert_eq!(format_coordinate((9, 0)), "J0");
    assert_eq!(format_coordinate((30, 2)), "30,2");
}
