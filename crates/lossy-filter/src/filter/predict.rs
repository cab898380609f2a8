//! PNG row-filter predictors.
//!
//! These are the predictions a PNG encoder subtracts before compressing a
//! row. The optimizers reproduce them exactly so they know which residual the
//! encoder will see.

/// PNG "Average" predictor: integer mean of the byte above and the byte to the left.
#[inline]
pub fn average_predictor(above: u8, left: u8) -> u8 {
    ((above as u16 + left as u16) / 2) as u8
}

/// PNG "Paeth" predictor.
///
/// `a` = left, `b` = above, `c` = upper left. Returns whichever neighbor is
/// closest to `a + b - c`, breaking ties in the order a, b, c.
#[inline]
pub fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let a = a as i16;
    let b = b as i16;
    let c = c as i16;

    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        a as u8
    } else if pb <= pc {
        b as u8
    } else {
        c as u8
    }
}
