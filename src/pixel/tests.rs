// src/pixel/tests.rs

use super::*;
use crate::palette::PALETTE_ANIM_SIZE;

#[test_log::test]
fn source_pixel_fields_round_trip() {
    let colors = [Color16::BLACK, Color16::new(31, 63, 31), Color16::new(5, 17, 29)];
    for &color in &colors {
        for alpha in 0..=15 {
            for brightness in 0..=15 {
                for remap in [0u8, 1, 127, 226, 227, 255] {
                    let px = SourcePixel::new(color, alpha, brightness, remap);
                    assert_eq!(px.color(), color);
                    assert_eq!(px.alpha(), alpha);
                    assert_eq!(px.brightness(), brightness);
                    assert_eq!(px.remap(), remap);
                }
            }
        }
    }
}

#[test_log::test]
fn source_pixel_fields_do_not_bleed() {
    let px = SourcePixel::new(Color16::from_raw(0xFFFF), 0x1F, 0x1F, 0);
    assert_eq!(px.alpha(), 0xF);
    assert_eq!(px.brightness(), 0xF);
    assert_eq!(px.remap(), 0);
    assert_eq!(px.color().raw(), 0xFFFF);
}

#[test_log::test]
fn anim_cell_fields_round_trip() {
    for index in 0..32 {
        for brightness in 0..8 {
            let cell = AnimCell::new(index, brightness);
            assert_eq!(cell.index(), index);
            assert_eq!(cell.brightness(), brightness);
            assert_eq!(AnimCell::from_raw(cell.raw()), cell);
        }
    }
}

#[test_log::test]
fn every_animated_palette_entry_fits_in_a_cell() {
    for offset in 0..PALETTE_ANIM_SIZE {
        let palette_index = PALETTE_ANIM_START + offset;
        let cell = AnimCell::animated(palette_index, 15);
        assert!(cell.is_animated());
        assert_eq!(cell.palette_index(), Some(palette_index));
        assert_eq!(cell.brightness(), 7);
    }
}

#[test_log::test]
fn plain_palette_entries_clear_the_cell() {
    assert_eq!(AnimCell::for_palette_index(0, 8), AnimCell::NONE);
    assert_eq!(AnimCell::for_palette_index(PALETTE_ANIM_START - 1, 8), AnimCell::NONE);
    assert!(AnimCell::for_palette_index(PALETTE_ANIM_START, 8).is_animated());
    assert_eq!(AnimCell::NONE.palette_index(), None);
}
