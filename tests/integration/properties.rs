//! Property tests for the bytecode layer

use proptest::prelude::*;
use rush_demo::bytecode::{
    build_forest, encode_operations, encode_program, flatten_forest, Decoder, DemoText, Direction,
    Operation,
};
use std::collections::BTreeSet;

fn text() -> impl Strategy<Value = DemoText> {
    "\\PC{0,12}".prop_map(DemoText::unresolved)
}

fn movement() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (any::<u16>(), any::<u16>(), any::<u16>()).prop_map(|(block_x, block_y, frame_count)| {
            Operation::MoveCamera {
                block_x,
                block_y,
                frame_count,
            }
        }),
        any::<u32>().prop_map(|frame_count| Operation::Delay { frame_count }),
        any::<u8>().prop_map(|b| Operation::PlayerMove {
            direction: Direction::from_byte(b)
        }),
        (any::<u16>(), any::<u16>(), any::<u8>(), any::<u8>()).prop_map(
            |(block_x, block_y, block_id, special_data)| Operation::SetBlockShort {
                block_x,
                block_y,
                block_id,
                special_data,
            }
        ),
        (any::<u16>(), any::<u16>(), any::<u32>()).prop_map(|(block_x, block_y, block_id)| {
            Operation::SetBlockLong {
                block_x,
                block_y,
                block_id,
            }
        }),
    ]
}

fn presentation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (any::<u8>(), any::<u16>(), text()).prop_map(|(line_count, offset_y, text)| {
            Operation::PaintChat {
                line_count,
                offset_y,
                text,
            }
        }),
        text().prop_map(|text| Operation::PaintHint { text }),
        (any::<u16>(), any::<u16>()).prop_map(|(hero_sprite_id, background_anim_id)| {
            Operation::SetDemoSprite {
                hero_sprite_id,
                background_anim_id,
            }
        }),
        (any::<u16>(), any::<u16>()).prop_map(|(x, y)| Operation::SetPosAndShow { x, y }),
        Just(Operation::HideDemoSprite),
        (any::<u16>(), any::<u8>()).prop_map(|(frame_index, blink_count)| {
            Operation::ShowDecoSymbol {
                frame_index,
                blink_count,
            }
        }),
        (any::<u16>(), any::<u8>())
            .prop_map(|(unused, need_hide)| Operation::HideDecoSymbol { unused, need_hide }),
        (any::<u8>(), any::<[u8; 3]>())
            .prop_map(|(blink_count, color)| Operation::ScreenBlink { blink_count, color }),
    ]
}

fn leaf() -> impl Strategy<Value = Operation> {
    prop_oneof![movement(), presentation()]
}

fn top_level() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => leaf(),
        1 => prop::collection::vec(leaf(), 0..4).prop_map(Operation::parallel),
    ]
}

proptest! {
    /// Decoding an encoded forest gives the same forest and the same bytes.
    #[test]
    fn prop_forest_survives_encode_decode(
        forest in prop::collection::vec(top_level(), 0..12),
        sprites in prop::collection::vec(any::<u16>(), 0..8),
    ) {
        let bytes = encode_program(1, &sprites, &forest);
        let program = Decoder::default()
            .decode_program(&bytes)
            .expect("encoded program decodes")
            .into_program();

        prop_assert_eq!(&program.operations, &forest);
        prop_assert!(program.stopped_at.is_none());
        let flat = flatten_forest(&forest);
        prop_assert_eq!(program.operation_bytes(), &encode_operations(&flat)[..]);
        prop_assert_eq!(build_forest(flat), forest);
    }

    /// Sprite ids come out sorted with duplicates removed.
    #[test]
    fn prop_sprite_ids_sorted_and_unique(
        sprites in prop::collection::vec(any::<u16>(), 0..32),
    ) {
        let bytes = encode_program(1, &sprites, &[Operation::Delay { frame_count: 1 }]);
        let program = Decoder::default()
            .decode_program(&bytes)
            .expect("encoded program decodes")
            .into_program();

        let expected: Vec<u16> = sprites.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(program.sprite_ids, expected);
    }
}
