use holdem_cli::run;

fn eval(args: &[&str]) -> (i32, String) {
    let mut argv = vec!["holdem", "eval"];
    argv.extend_from_slice(args);
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(argv, &mut out, &mut err);
    (code, String::from_utf8_lossy(&out).into_owned())
}

#[test]
fn wheel_is_a_five_high_straight() {
    let (code, out) = eval(&["AD", "2C", "3H", "4S", "5D", "9C", "KH"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Straight"), "got {}", out);
    assert!(!out.starts_with("Straight flush"));
}

#[test]
fn cards_can_be_passed_as_one_argument() {
    let (code, out) = eval(&["KS KD 7C 7H 2D"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Two pair"), "got {}", out);
}

#[test]
fn json_output_is_machine_readable() {
    let (code, out) = eval(&["--json", "AH", "AD", "AC", "KS", "KD"]);
    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["hand"]["category"], "FullHouse");
    assert_eq!(value["hand"]["high"], "Ace");
}

#[test]
fn eight_cards_are_too_many() {
    let (code, out) = eval(&["AH", "KH", "QH", "JH", "TH", "9H", "8H", "7H"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
}
