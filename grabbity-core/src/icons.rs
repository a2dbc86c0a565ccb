//! Display icons

use grabbity_display::Bitmap;

const RESIN_DATA: [u8; 8] = [
    0b0001_1000,
    0b0010_0100,
    0b0100_0010,
    0b1001_1001,
    0b1010_0101,
    0b0100_0010,
    0b0010_0100,
    0b0001_1000,
];

/// 8x8 resin crystal shown next to the resin count
pub const RESIN: Bitmap<'static> = match Bitmap::new(&RESIN_DATA, 8, 8) {
    Some(bitmap) => bitmap,
    None => panic!("resin icon data too short"),
};
