//! Integer rasterizers for lines, rectangles and circles
//!
//! Every shape checks its extent against the buffer before plotting, so a rejected shape
//! leaves the buffer exactly as it was.

use crate::graphics::framebuffer::FrameBuffer;
use crate::pcd8544::error::Error;

fn ensure_inside(buffer: &FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), Error> {
    if buffer.contains(x0, y0) && buffer.contains(x1, y1) {
        Ok(())
    } else {
        Err(Error::InvalidArgument)
    }
}

/// Widen a size argument into the signed coordinate space, rejecting overflow.
fn span(origin: i32, extent: u32) -> Result<i32, Error> {
    i32::try_from(extent)
        .ok()
        .and_then(|extent| origin.checked_add(extent))
        .ok_or(Error::InvalidArgument)
}

/// Bresenham line from `(x1, y1)` to `(x2, y2)`, both endpoints included.
pub fn draw_line(
    buffer: &mut FrameBuffer,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    on: bool,
) -> Result<(), Error> {
    ensure_inside(buffer, x1, y1, x2, y2)?;
    plot_line(buffer, x1, y1, x2, y2, on)
}

fn plot_line(
    buffer: &mut FrameBuffer,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    on: bool,
) -> Result<(), Error> {
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = (x2 - x1).signum();
    let sy = (y2 - y1).signum();
    let mut err = dx - dy;
    let (mut x, mut y) = (x1, y1);

    loop {
        buffer.set_pixel(x, y, on)?;
        if x == x2 && y == y2 {
            return Ok(());
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Outline spanning `x..=x+w` and `y..=y+h`, drawn as four independent lines.
pub fn draw_rectangle(
    buffer: &mut FrameBuffer,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    on: bool,
) -> Result<(), Error> {
    let right = span(x, w)?;
    let bottom = span(y, h)?;
    ensure_inside(buffer, x, y, right, bottom)?;

    plot_line(buffer, x, y, right, y, on)?;
    plot_line(buffer, x, y, x, bottom, on)?;
    plot_line(buffer, right, y, right, bottom, on)?;
    plot_line(buffer, x, bottom, right, bottom, on)
}

/// `h` rows starting at `y`, each spanning `x..=x+w`.
pub fn draw_filled_rectangle(
    buffer: &mut FrameBuffer,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    on: bool,
) -> Result<(), Error> {
    if h == 0 {
        return Ok(());
    }
    let right = span(x, w)?;
    let bottom = span(y, h - 1)?;
    ensure_inside(buffer, x, y, right, bottom)?;

    for row in y..=bottom {
        plot_line(buffer, x, row, right, row, on)?;
    }
    Ok(())
}

/// Midpoint circle outline of radius `r` around `(cx, cy)`.
pub fn draw_circle(
    buffer: &mut FrameBuffer,
    cx: i32,
    cy: i32,
    r: u32,
    on: bool,
) -> Result<(), Error> {
    let r = i32::try_from(r).map_err(|_| Error::InvalidArgument)?;
    let left = cx.checked_sub(r).ok_or(Error::InvalidArgument)?;
    let top = cy.checked_sub(r).ok_or(Error::InvalidArgument)?;
    let right = cx.checked_add(r).ok_or(Error::InvalidArgument)?;
    let bottom = cy.checked_add(r).ok_or(Error::InvalidArgument)?;
    ensure_inside(buffer, left, top, right, bottom)?;

    let mut x = r;
    let mut y = 0;
    let mut decision = 1 - r;

    while y <= x {
        for (px, py) in [
            (cx + x, cy + y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx - x, cy + y),
            (cx - x, cy - y),
            (cx - y, cy - x),
            (cx + y, cy - x),
            (cx + x, cy - y),
        ] {
            buffer.set_pixel(px, py, on)?;
        }

        y += 1;
        if decision <= 0 {
            decision += 2 * y + 1;
        } else {
            x -= 1;
            decision += 2 * (y - x) + 1;
        }
    }
    Ok(())
}
