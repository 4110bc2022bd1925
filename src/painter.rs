//! Gray shape rasterizer
//!
//! Decomposes shapes into pixel coordinates, runs every coordinate through the
//! dither engine and forwards the black/white decision to a pixel sink. The
//! sink is any [`DrawTarget`] over [`BinaryColor`], so the painter works the
//! same on a full-frame buffer, a page buffer, or a mock in tests.
//!
//! All operations take panel coordinates as `i32`; intermediate values may go
//! negative (a circle center near the frame edge) and clipping is entirely the
//! sink's business. One shape call uses one uniform gray level throughout,
//! which keeps the overdraw at circle seams and rounded-rect joints invisible:
//! the dither decision for a coordinate never changes within the call.

use core::iter::once;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::dither::Gray;

/// Shape rasterizer bound to one pixel sink.
///
/// Every operation bottoms out in [`GrayPainter::draw_pixel`]; errors are
/// whatever the sink reports, passed straight through.
pub struct GrayPainter<'a, D> {
    target: &'a mut D,
}

impl<'a, D> GrayPainter<'a, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    /// Attach a painter to a pixel sink
    pub fn new(target: &'a mut D) -> Self {
        GrayPainter { target }
    }

    /// Dither-and-set a single pixel
    pub fn draw_pixel(&mut self, x: i32, y: i32, gray: Gray) -> Result<(), D::Error> {
        self.target
            .draw_iter(once(Pixel(Point::new(x, y), gray.color(x, y))))
    }

    /// Horizontal run of `width` pixels starting at (x, y)
    fn hline(&mut self, x: i32, y: i32, width: u32, gray: Gray) -> Result<(), D::Error> {
        self.target.draw_iter(
            (x..x + width as i32).map(|px| Pixel(Point::new(px, y), gray.color(px, y))),
        )
    }

    /// Vertical run of `height` pixels starting at (x, y)
    fn vline(&mut self, x: i32, y: i32, height: u32, gray: Gray) -> Result<(), D::Error> {
        self.target.draw_iter(
            (y..y + height as i32).map(|py| Pixel(Point::new(x, py), gray.color(x, py))),
        )
    }

    /// Rectangle outline, one pixel thick.
    ///
    /// Zero width or height is a no-op. Corner pixels are visited twice, which
    /// is harmless under a uniform level.
    pub fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        gray: Gray,
    ) -> Result<(), D::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.hline(x, y, width, gray)?;
        self.hline(x, y + height as i32 - 1, width, gray)?;
        self.vline(x, y, height, gray)?;
        self.vline(x + width as i32 - 1, y, height, gray)
    }

    /// Filled rectangle: every cell of the `width` x `height` block exactly once.
    ///
    /// Zero width or height is a no-op.
    pub fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        gray: Gray,
    ) -> Result<(), D::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        for py in y..y + height as i32 {
            self.hline(x, py, width, gray)?;
        }
        Ok(())
    }

    /// Line from (x0, y0) to (x1, y1), endpoints inclusive.
    ///
    /// Integer Bresenham, error-accumulator variant: no floating point, the
    /// minimal connected path for any two endpoints, and exactly one pixel
    /// when both endpoints coincide.
    pub fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        gray: Gray,
    ) -> Result<(), D::Error> {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.draw_pixel(x, y, gray)?;
            if x == x1 && y == y1 {
                return Ok(());
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Circle outline via the midpoint algorithm.
    ///
    /// One octant is tracked and mirrored eight ways; the axis and diagonal
    /// seams are touched more than once per revolution, which dithering
    /// tolerates. `radius == 0` degenerates to the center pixel.
    pub fn draw_circle(
        &mut self,
        xc: i32,
        yc: i32,
        radius: u32,
        gray: Gray,
    ) -> Result<(), D::Error> {
        let r = radius as i32;
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        self.draw_pixel(xc, yc + r, gray)?;
        self.draw_pixel(xc, yc - r, gray)?;
        self.draw_pixel(xc + r, yc, gray)?;
        self.draw_pixel(xc - r, yc, gray)?;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            self.draw_pixel(xc + x, yc + y, gray)?;
            self.draw_pixel(xc - x, yc + y, gray)?;
            self.draw_pixel(xc + x, yc - y, gray)?;
            self.draw_pixel(xc - x, yc - y, gray)?;
            self.draw_pixel(xc + y, yc + x, gray)?;
            self.draw_pixel(xc - y, yc + x, gray)?;
            self.draw_pixel(xc + y, yc - x, gray)?;
            self.draw_pixel(xc - y, yc - x, gray)?;
        }
        Ok(())
    }

    /// Filled disk: the midpoint walk from [`GrayPainter::draw_circle`] with a
    /// horizontal span between the mirrored edge points at every step.
    pub fn fill_circle(
        &mut self,
        xc: i32,
        yc: i32,
        radius: u32,
        gray: Gray,
    ) -> Result<(), D::Error> {
        let r = radius as i32;
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        self.hline(xc - r, yc, 2 * radius + 1, gray)?;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            self.hline(xc - x, yc + y, 2 * x as u32 + 1, gray)?;
            self.hline(xc - x, yc - y, 2 * x as u32 + 1, gray)?;
            self.hline(xc - y, yc + x, 2 * y as u32 + 1, gray)?;
            self.hline(xc - y, yc - x, 2 * y as u32 + 1, gray)?;
        }
        Ok(())
    }

    /// Rounded rectangle outline: four corner rings plus four one-pixel edges.
    ///
    /// The caller must keep `2 * radius < min(width, height)`; larger radii
    /// produce overlapping corner geometry which is drawn as requested.
    pub fn draw_round_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        radius: u32,
        gray: Gray,
    ) -> Result<(), D::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        if 2 * radius >= width.min(height) {
            log::warn!(
                "round rect radius {} too large for {}x{}, corners will overlap",
                radius,
                width,
                height
            );
        }
        let r = radius as i32;
        let w = width as i32;
        let h = height as i32;
        let edge_w = width.saturating_sub(2 * radius);
        let edge_h = height.saturating_sub(2 * radius);

        self.draw_circle(x + r, y + r, radius, gray)?;
        self.draw_circle(x + w - r - 1, y + r, radius, gray)?;
        self.draw_circle(x + r, y + h - r - 1, radius, gray)?;
        self.draw_circle(x + w - r - 1, y + h - r - 1, radius, gray)?;

        self.draw_rect(x + r, y, edge_w, 1, gray)?;
        self.draw_rect(x + r, y + h - 1, edge_w, 1, gray)?;
        self.draw_rect(x, y + r, 1, edge_h, gray)?;
        self.draw_rect(x + w - 1, y + r, 1, edge_h, gray)
    }

    /// Filled rounded rectangle: four corner disks plus two overlapping
    /// rectangles spanning the central cross.
    ///
    /// Same radius contract as [`GrayPainter::draw_round_rect`].
    pub fn fill_round_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        radius: u32,
        gray: Gray,
    ) -> Result<(), D::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        if 2 * radius >= width.min(height) {
            log::warn!(
                "round rect radius {} too large for {}x{}, corners will overlap",
                radius,
                width,
                height
            );
        }
        let r = radius as i32;
        let w = width as i32;
        let h = height as i32;

        self.fill_circle(x + r, y + r, radius, gray)?;
        self.fill_circle(x + w - r - 1, y + r, radius, gray)?;
        self.fill_circle(x + r, y + h - r - 1, radius, gray)?;
        self.fill_circle(x + w - r - 1, y + h - r - 1, radius, gray)?;

        self.fill_rect(x + r, y, width.saturating_sub(2 * radius), height, gray)?;
        self.fill_rect(x, y + r, width, height.saturating_sub(2 * radius), gray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Pixel sink that records every event in call order
    struct RecordingSink {
        events: Vec<(i32, i32, BinaryColor)>,
    }

    impl RecordingSink {
        fn new() -> Self {
            RecordingSink { events: Vec::new() }
        }

        fn coords(&self) -> Vec<(i32, i32)> {
            self.events.iter().map(|&(x, y, _)| (x, y)).collect()
        }

        fn covered(&self) -> HashSet<(i32, i32)> {
            self.coords().into_iter().collect()
        }
    }

    impl OriginDimensions for RecordingSink {
        fn size(&self) -> Size {
            Size::new(4096, 4096)
        }
    }

    impl DrawTarget for RecordingSink {
        type Color = BinaryColor;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                self.events.push((point.x, point.y, color));
            }
            Ok(())
        }
    }

    #[test]
    fn pixel_forwards_dither_decision() {
        let mut sink = RecordingSink::new();
        let gray = Gray::new(9);
        GrayPainter::new(&mut sink).draw_pixel(3, 5, gray).unwrap();
        assert_eq!(sink.events, vec![(3, 5, gray.color(3, 5))]);
    }

    #[test]
    fn degenerate_line_is_exactly_one_pixel() {
        let mut sink = RecordingSink::new();
        GrayPainter::new(&mut sink)
            .draw_line(5, 9, 5, 9, Gray::new(8))
            .unwrap();
        assert_eq!(sink.coords(), vec![(5, 9)]);
    }

    #[test]
    fn line_visits_endpoints_and_stays_connected() {
        let mut sink = RecordingSink::new();
        GrayPainter::new(&mut sink)
            .draw_line(0, 0, 7, 3, Gray::BLACK)
            .unwrap();
        let coords = sink.coords();
        assert_eq!(coords.first(), Some(&(0, 0)));
        assert_eq!(coords.last(), Some(&(7, 3)));
        assert_eq!(coords.len(), 8); // one step per major-axis pixel
        for pair in coords.windows(2) {
            let (dx, dy) = (pair[1].0 - pair[0].0, pair[1].1 - pair[0].1);
            assert!(dx.abs() <= 1 && dy.abs() <= 1, "gap between {pair:?}");
        }
    }

    #[test]
    fn steep_and_reversed_lines_are_deterministic() {
        let mut forward = RecordingSink::new();
        GrayPainter::new(&mut forward)
            .draw_line(2, -3, -1, 6, Gray::new(12))
            .unwrap();
        assert_eq!(forward.coords().first(), Some(&(2, -3)));
        assert_eq!(forward.coords().last(), Some(&(-1, 6)));
        assert_eq!(forward.coords().len(), 10);
    }

    #[test]
    fn fill_rect_covers_block_exactly_once() {
        let mut sink = RecordingSink::new();
        GrayPainter::new(&mut sink)
            .fill_rect(3, 4, 5, 6, Gray::new(7))
            .unwrap();
        assert_eq!(sink.events.len(), 30);
        assert_eq!(sink.covered().len(), 30);
        for (x, y, _) in &sink.events {
            assert!((3..8).contains(x) && (4..10).contains(y));
        }
    }

    #[test]
    fn zero_sized_rects_are_no_ops() {
        let mut sink = RecordingSink::new();
        let mut painter = GrayPainter::new(&mut sink);
        painter.fill_rect(10, 10, 0, 5, Gray::BLACK).unwrap();
        painter.fill_rect(10, 10, 5, 0, Gray::BLACK).unwrap();
        painter.draw_rect(10, 10, 0, 0, Gray::BLACK).unwrap();
        assert!(sink.events.is_empty());
    }

    #[test]
    fn rect_outline_touches_only_the_perimeter() {
        let mut sink = RecordingSink::new();
        GrayPainter::new(&mut sink)
            .draw_rect(2, 2, 4, 3, Gray::BLACK)
            .unwrap();
        let mut expected = HashSet::new();
        for x in 2..6 {
            expected.insert((x, 2));
            expected.insert((x, 4));
        }
        for y in 2..5 {
            expected.insert((2, y));
            expected.insert((5, y));
        }
        assert_eq!(sink.covered(), expected);
    }

    #[test]
    fn zero_radius_circles_degenerate_to_center() {
        let mut outline = RecordingSink::new();
        GrayPainter::new(&mut outline)
            .draw_circle(7, 7, 0, Gray::new(5))
            .unwrap();
        assert_eq!(outline.covered(), HashSet::from([(7, 7)]));

        let mut filled = RecordingSink::new();
        GrayPainter::new(&mut filled)
            .fill_circle(7, 7, 0, Gray::new(5))
            .unwrap();
        assert_eq!(filled.covered(), HashSet::from([(7, 7)]));
    }

    #[test]
    fn filled_circle_covers_the_disk() {
        let mut sink = RecordingSink::new();
        GrayPainter::new(&mut sink)
            .fill_circle(10, 10, 3, Gray::BLACK)
            .unwrap();
        let covered = sink.covered();
        // every Euclidean-disk pixel present, nothing outside the bounding box
        for dy in -3i32..=3 {
            for dx in -3i32..=3 {
                if dx * dx + dy * dy <= 9 {
                    assert!(covered.contains(&(10 + dx, 10 + dy)), "hole at {dx},{dy}");
                }
            }
        }
        for &(x, y) in &covered {
            assert!((7..=13).contains(&x) && (7..=13).contains(&y));
        }
        // midpoint fill is symmetric in both axes
        for &(x, y) in &covered {
            assert!(covered.contains(&(20 - x, y)));
            assert!(covered.contains(&(x, 20 - y)));
        }
    }

    #[test]
    fn circle_outline_is_a_subset_of_the_fill() {
        let mut outline = RecordingSink::new();
        GrayPainter::new(&mut outline)
            .draw_circle(0, 0, 5, Gray::BLACK)
            .unwrap();
        let mut filled = RecordingSink::new();
        GrayPainter::new(&mut filled)
            .fill_circle(0, 0, 5, Gray::BLACK)
            .unwrap();
        for coord in outline.covered() {
            assert!(filled.covered().contains(&coord), "outline escapes fill at {coord:?}");
        }
    }

    #[test]
    fn drawing_twice_produces_identical_events() {
        let mut sink = RecordingSink::new();
        let mut painter = GrayPainter::new(&mut sink);
        painter.fill_round_rect(1, 2, 10, 8, 2, Gray::new(6)).unwrap();
        let first = sink.events.len();
        GrayPainter::new(&mut sink)
            .fill_round_rect(1, 2, 10, 8, 2, Gray::new(6))
            .unwrap();
        assert_eq!(sink.events[..first], sink.events[first..]);
    }

    #[test]
    fn all_events_agree_with_the_dither_engine() {
        let gray = Gray::new(11);
        let mut sink = RecordingSink::new();
        let mut painter = GrayPainter::new(&mut sink);
        painter.draw_line(0, 0, 20, 9, gray).unwrap();
        painter.fill_circle(30, 5, 4, gray).unwrap();
        painter.draw_round_rect(40, 0, 12, 12, 3, gray).unwrap();
        for &(x, y, color) in &sink.events {
            assert_eq!(color, gray.color(x, y), "at ({x},{y})");
        }
    }

    #[test]
    fn gray_extremes_paint_solid_colors() {
        let mut sink = RecordingSink::new();
        GrayPainter::new(&mut sink)
            .fill_rect(0, 0, 8, 8, Gray::WHITE)
            .unwrap();
        assert!(sink.events.iter().all(|&(_, _, c)| c == BinaryColor::Off));

        let mut sink = RecordingSink::new();
        GrayPainter::new(&mut sink)
            .fill_rect(0, 0, 8, 8, Gray::BLACK)
            .unwrap();
        assert!(sink.events.iter().all(|&(_, _, c)| c == BinaryColor::On));
    }

    #[test]
    fn filled_round_rect_stays_in_bounds_and_covers_the_cross() {
        let gray = Gray::new(4);
        let mut sink = RecordingSink::new();
        GrayPainter::new(&mut sink)
            .fill_round_rect(20, 20, 15, 176, 3, gray)
            .unwrap();

        for &(x, y, color) in &sink.events {
            assert!((20..35).contains(&x), "x {x} out of bounds");
            assert!((20..196).contains(&y), "y {y} out of bounds");
            assert_eq!(color, gray.color(x, y));
        }

        let covered = sink.covered();
        // central vertical band, full height
        for y in 20..196 {
            for x in 23..32 {
                assert!(covered.contains(&(x, y)), "hole at ({x},{y})");
            }
        }
        // central horizontal band, full width
        for y in 23..193 {
            for x in 20..35 {
                assert!(covered.contains(&(x, y)), "hole at ({x},{y})");
            }
        }
    }
}
