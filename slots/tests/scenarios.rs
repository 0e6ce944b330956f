//! Scenario tests for packing a call's arguments into slots.

use rvjni_slots::{ManagedRef, Slot, SlotLayout, TargetLayout};

fn bits(slots: &[Slot]) -> Vec<u32> {
    slots.iter().map(|s| s.to_bits()).collect()
}

#[test]
fn scenario_when_int_long_ref_pushed_then_layout_and_values_match() {
    let mut slots = vec![Slot::default(); 6];
    let mut pos = 0;

    let int_at = pos;
    TargetLayout::push_int(42, &mut slots, &mut pos);
    assert_eq!(pos, 1);

    let long_at = pos;
    TargetLayout::push_long(0x1122_3344_5566_7788, &mut slots, &mut pos);
    assert_eq!(pos, 3);

    let obj_at = pos;
    TargetLayout::push_obj(ManagedRef::from_raw(0xABCD), &mut slots, &mut pos);
    assert_eq!(pos, 4);

    assert_eq!(
        bits(&slots),
        vec![42, 0x1122_3344, 0x5566_7788, 0xABCD, 0, 0]
    );

    assert_eq!(TargetLayout::get_int(&slots[int_at..]), 42);
    assert_eq!(
        TargetLayout::get_long(&slots[long_at..]),
        0x1122_3344_5566_7788
    );
    assert_eq!(
        TargetLayout::get_obj(&slots[obj_at..]),
        ManagedRef::from_raw(0xABCD)
    );
}

#[test]
fn scenario_when_int_long_ref_double_pushed_then_cursor_is_six() {
    let mut slots = vec![Slot::default(); 6];
    let mut pos = 0;
    let mut offsets = Vec::new();

    offsets.push(pos);
    TargetLayout::push_int(-7, &mut slots, &mut pos);
    offsets.push(pos);
    TargetLayout::push_long(i64::MIN, &mut slots, &mut pos);
    offsets.push(pos);
    TargetLayout::push_obj(ManagedRef::from_raw(0xFFFF_FFF0), &mut slots, &mut pos);
    offsets.push(pos);
    TargetLayout::push_double(f64::NEG_INFINITY, &mut slots, &mut pos);

    assert_eq!(pos, 6);
    assert_eq!(offsets, vec![0, 1, 3, 4]);
    assert_eq!(TargetLayout::get_int(&slots[0..]), -7);
    assert_eq!(TargetLayout::get_long(&slots[1..]), i64::MIN);
    assert_eq!(TargetLayout::get_obj(&slots[3..]).to_raw(), 0xFFFF_FFF0);
    assert_eq!(TargetLayout::get_double(&slots[4..]), f64::NEG_INFINITY);
}

#[test]
fn scenario_when_long_written_mid_array_then_neighbours_untouched() {
    let sentinel = Slot::from_bits(0xCAFE_F00D);
    let mut slots = vec![sentinel; 4];

    TargetLayout::put_long(-1, &mut slots[1..]);

    assert_eq!(slots[0], sentinel);
    assert_eq!(slots[3], sentinel);
    assert_eq!(bits(&slots[1..3]), vec![0xFFFF_FFFF, 0xFFFF_FFFF]);
}

#[test]
fn scenario_when_disjoint_ranges_filled_from_threads_then_each_roundtrips() {
    let mut slots = vec![Slot::default(); 8];
    let (left, right) = slots.split_at_mut(4);

    std::thread::scope(|s| {
        s.spawn(move || {
            let mut pos = 0;
            TargetLayout::push_long(0x0102_0304_0506_0708, left, &mut pos);
            TargetLayout::push_double(0.5, left, &mut pos);
        });
        s.spawn(move || {
            let mut pos = 0;
            TargetLayout::push_double(-2.0, right, &mut pos);
            TargetLayout::push_float(3.5, right, &mut pos);
            TargetLayout::push_int(9, right, &mut pos);
        });
    });

    let mut pos = 0;
    assert_eq!(TargetLayout::next_long(&slots, &mut pos), 0x0102_0304_0506_0708);
    assert_eq!(TargetLayout::next_double(&slots, &mut pos), 0.5);
    assert_eq!(TargetLayout::next_double(&slots, &mut pos), -2.0);
    assert_eq!(TargetLayout::next_float(&slots, &mut pos), 3.5);
    assert_eq!(TargetLayout::next_int(&slots, &mut pos), 9);
    assert_eq!(pos, 8);
}
