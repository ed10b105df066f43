// src/palette/tests.rs

use super::*;

fn ramp() -> Palette {
    let mut colors = [Color32::default(); PALETTE_SIZE];
    for (i, c) in colors.iter_mut().enumerate() {
        let v = i as u8;
        *c = Color32::new(v, v, 255 - v);
    }
    Palette::new(colors)
}

#[test_log::test]
fn table_matches_downsampled_palette() {
    let palette = ramp();
    let table = PaletteTable::new(&palette);
    for i in 0..=255u8 {
        assert_eq!(table.lookup(i), palette.lookup(i));
        assert_eq!(table.lookup(i), Color16::from(palette.color32(i)));
    }
}

#[test_log::test]
fn refresh_rebuilds_every_entry_for_partial_updates() {
    let mut palette = ramp();
    let mut table = PaletteTable::new(&palette);

    palette.colors[3] = Color32::new(255, 255, 255);
    palette.cycle_animation(1);
    assert_eq!(palette.first_dirty, usize::from(PALETTE_ANIM_START));
    table.refresh(&palette);

    assert_eq!(table.lookup(3), Color16::new(31, 63, 31));
    assert_eq!(table.lookup(PALETTE_ANIM_START), palette.lookup(PALETTE_ANIM_START));
}

#[test_log::test]
#[should_panic(expected = "unexpected first dirty palette entry")]
fn refresh_rejects_unexpected_dirty_start() {
    let mut palette = ramp();
    palette.first_dirty = 10;
    PaletteTable::default().refresh(&palette);
}

#[test_log::test]
fn cycling_only_moves_the_animated_range() {
    let before = ramp();
    let mut after = before.clone();
    after.cycle_animation(3);

    let start = usize::from(PALETTE_ANIM_START);
    let end = start + usize::from(PALETTE_ANIM_SIZE);
    assert_eq!(before.colors[..start], after.colors[..start]);
    assert_eq!(before.colors[end..], after.colors[end..]);
    assert_eq!(after.colors[start], before.colors[start + 3]);
    assert_eq!(after.count_dirty, usize::from(PALETTE_ANIM_SIZE));
}
