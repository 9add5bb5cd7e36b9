use grid_labs::{Error, Field, GameDict, GameState, Image, Nested, logging};

fn hyper_dict() -> GameDict {
    serde_json::from_str(
        r#"{"dimensions": [2, 4, 2],
            "board": [[[3, "."], [3, 3], [1, 1], [0, 0]],
                      [[".", 3], [3, "."], [1, 1], [0, 0]]],
            "mask": [[[false, false], [false, true], [false, false], [false, false]],
                     [[false, false], [false, false], [false, false], [false, false]]],
            "state": "ongoing"}"#,
    )
    .unwrap()
}

fn symbols(rows: &[&[&[&str]]]) -> Nested<String> {
    Nested::Array(
        rows.iter()
            .map(|plane| {
                Nested::Array(
                    plane
                        .iter()
                        .map(|row| {
                            Nested::Array(
                                row.iter().map(|s| Nested::Leaf(s.to_string())).collect(),
                            )
                        })
                        .collect(),
                )
            })
            .collect(),
    )
}

#[test]
fn construct_matches_dictionary_board() {
    logging::init_for_tests();
    let field = Field::new(vec![2, 4, 2], [[0usize, 0, 1], [1, 0, 0], [1, 1, 1]]).unwrap();
    let dict = field.to_dict();
    assert_eq!(dict.board, hyper_dict().board);
    assert_eq!(dict.state, GameState::Ongoing);
    assert_eq!(dict.mask.get(&[1, 3, 1]), Some(&false));
}

#[test]
fn digging_a_zero_cell_floods_the_region() {
    logging::init_for_tests();
    let mut field = Field::from_dict(&hyper_dict()).unwrap();
    assert_eq!(field.dig(&[0, 3, 0]).unwrap(), 8);
    assert_eq!(field.state(), GameState::Ongoing);
    assert_eq!(
        field.render(false),
        symbols(&[
            &[&["_", "_"], &["_", "3"], &["1", "1"], &[" ", " "]],
            &[&["_", "_"], &["_", "_"], &["1", "1"], &[" ", " "]],
        ])
    );
    assert_eq!(
        field.render(true),
        symbols(&[
            &[&["3", "."], &["3", "3"], &["1", "1"], &[" ", " "]],
            &[&[".", "3"], &["3", "."], &["1", "1"], &[" ", " "]],
        ])
    );
}

#[test]
fn digging_a_bomb_ends_the_game() {
    logging::init_for_tests();
    let mut field = Field::from_dict(&hyper_dict()).unwrap();
    assert_eq!(field.dig(&[0, 0, 1]).unwrap(), 1);
    assert_eq!(field.state(), GameState::Defeat);
    assert_eq!(field.dig(&[0, 3, 0]).unwrap(), 0);
    assert_eq!(field.hidden_count(), 14);
}

#[test]
fn two_dimensional_dig_wins() {
    logging::init_for_tests();
    let dict: GameDict = serde_json::from_str(
        r#"{"dimensions": [2, 4],
            "board": [[".", 3, 1, 0], [".", ".", 1, 0]],
            "mask": [[false, true, false, false], [false, false, false, false]],
            "state": "ongoing"}"#,
    )
    .unwrap();
    let mut field = Field::from_dict(&dict).unwrap();
    assert_eq!(field.dig(&[0, 3]).unwrap(), 4);
    assert_eq!(field.state(), GameState::Victory);
    assert_eq!(field.render_ascii(false).unwrap(), "_31 \n__1 ");
}

#[test]
fn restored_games_trust_their_state() {
    let mut dict = hyper_dict();
    dict.state = GameState::Defeat;
    let mut field = Field::from_dict(&dict).unwrap();
    assert_eq!(field.dig(&[0, 3, 0]).unwrap(), 0);
    assert_eq!(field.dig(&[9, 9, 9]).unwrap(), 0);
    assert_eq!(field.to_dict(), dict);
}

#[test]
fn mismatched_dictionary_is_rejected() {
    let mut dict = hyper_dict();
    dict.dimensions = vec![2, 4];
    assert!(matches!(Field::from_dict(&dict), Err(Error::ShapeMismatch(_))));

    let bad = r#"{"dimensions": [1, 1], "board": [["?"]], "mask": [[false]], "state": "ongoing"}"#;
    assert!(matches!(Field::from_json(bad), Err(Error::Json(_))));
}

#[test]
fn clamped_pixel_access() {
    let image = Image::from_pixels(3, 3, (1..=9u8).map(f64::from).collect()).unwrap();
    assert_eq!(image.get_pixel_clamped(-1, 4), 7.0);
    assert!(matches!(image.get_pixel(0, 3), Err(Error::OutOfBounds { .. })));
}

#[test]
fn carving_avoids_the_high_contrast_region() {
    logging::init_for_tests();
    #[rustfmt::skip]
    let pixels = vec![
        0.0, 0.0, 0.0, 0.0, 255.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 255.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 255.0, 0.0,
    ];
    let image = Image::from_pixels(6, 3, pixels).unwrap();
    let carved = image.seam_carving(2).unwrap();
    assert_eq!(carved.width(), 4);
    for y in 0..3 {
        let row: Vec<f64> = (0..4).map(|x| carved.get_pixel(x, y).unwrap()).collect();
        assert_eq!(row, vec![0.0, 0.0, 255.0, 0.0]);
    }
}
