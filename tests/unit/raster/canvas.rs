//! Tests for the composition canvas

#[cfg(test)]
mod tests {
    use crate::fixtures::{SIZE, gradient, solid, tint};
    use image::{Rgba, RgbaImage};
    use traitmint::GenerationError;
    use traitmint::raster::canvas::{Canvas, Rect};

    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    // Tests that a new canvas is transparent
    // Verified by filling the canvas with black
    #[test]
    fn test_new_canvas_transparent() {
        let canvas = Canvas::new(SIZE, SIZE);

        assert_eq!(canvas.dimensions(), (SIZE, SIZE));
        assert!(canvas.image().pixels().all(|&pixel| pixel == CLEAR));
    }

    // Tests that opaque pixels replace and transparent ones keep the canvas
    // Verified by drawing source pixels unconditionally
    #[test]
    fn test_draw_over_alpha() {
        let mut canvas = Canvas::new(SIZE, SIZE);
        canvas.draw_over(&solid(tint(1)), [0, 0]);

        let mut holed = solid(tint(2));
        holed.put_pixel(3, 3, CLEAR);
        canvas.draw_over(&holed, [0, 0]);

        assert_eq!(canvas.pixel([0, 0]).unwrap(), Rgba(tint(2)));
        assert_eq!(canvas.pixel([3, 3]).unwrap(), Rgba(tint(1)));
    }

    // Tests that partially transparent pixels blend
    // Verified by copying the source alpha
    #[test]
    fn test_draw_over_blends() {
        let mut canvas = Canvas::new(SIZE, SIZE);
        canvas.draw_over(&solid([0, 0, 255, 255]), [0, 0]);
        canvas.draw_over(&RgbaImage::from_pixel(SIZE, SIZE, Rgba([255, 0, 0, 128])), [0, 0]);

        let Rgba([r, _, b, a]) = canvas.pixel([5, 5]).unwrap();
        assert!(a >= 254);
        assert!(r > 100 && b > 100, "expected a blend, got r={r} b={b}");
    }

    // Tests clipping of offset layers
    // Verified by wrapping pixels past the edge
    #[test]
    fn test_draw_over_offset_clipped() {
        let mut canvas = Canvas::new(SIZE, SIZE);
        canvas.draw_over(&solid(tint(4)), [10, 10]);
        canvas.draw_over(&solid(tint(5)), [-14, 0]);

        assert_eq!(canvas.pixel([9, 9]).unwrap(), CLEAR);
        assert_eq!(canvas.pixel([12, 12]).unwrap(), Rgba(tint(4)));
        assert_eq!(canvas.pixel([1, 0]).unwrap(), Rgba(tint(5)));
        assert_eq!(canvas.pixel([2, 0]).unwrap(), CLEAR);
    }

    // Tests pixel reads outside the canvas
    // Verified by clamping the point to the edge
    #[test]
    fn test_pixel_out_of_bounds() {
        let canvas = Canvas::new(SIZE, SIZE);

        assert!(matches!(
            canvas.pixel([SIZE, 0]),
            Err(GenerationError::Raster {
                operation: "sample",
                ..
            })
        ));
    }

    // Tests that a fill copies the sampled colour without blending
    // Verified by alpha-compositing the fill colour
    #[test]
    fn test_fill_region() {
        let mut canvas = Canvas::new(SIZE, SIZE);
        canvas.draw_over(&gradient(SIZE, SIZE), [0, 0]);
        let sampled = canvas.pixel([8, 9]).unwrap();

        canvas
            .fill_region(Rect::from_corners([2, 2], [6, 5]), [8, 9])
            .unwrap();

        for y in 2..5 {
            for x in 2..6 {
                assert_eq!(canvas.pixel([x, y]).unwrap(), sampled);
            }
        }
        assert_eq!(canvas.pixel([6, 2]).unwrap(), Rgba([6, 2, 128, 255]));
        assert_eq!(canvas.pixel([2, 5]).unwrap(), Rgba([2, 5, 128, 255]));
    }

    // Tests that a transparent sample clears the region
    // Verified by skipping transparent fills
    #[test]
    fn test_fill_region_transparent_sample() {
        let mut canvas = Canvas::new(SIZE, SIZE);
        canvas.draw_over(&RgbaImage::from_pixel(4, 4, Rgba(tint(1))), [0, 0]);

        canvas
            .fill_region(Rect::from_corners([0, 0], [2, 2]), [10, 10])
            .unwrap();

        assert_eq!(canvas.pixel([1, 1]).unwrap(), CLEAR);
        assert_eq!(canvas.pixel([3, 3]).unwrap(), Rgba(tint(1)));
    }

    // Tests fill rejection outside the canvas
    // Verified by clipping the region silently
    #[test]
    fn test_fill_region_out_of_bounds() {
        let mut canvas = Canvas::new(SIZE, SIZE);

        assert!(canvas
            .fill_region(Rect::from_corners([10, 10], [SIZE + 1, 12]), [0, 0])
            .is_err());
        assert!(canvas
            .fill_region(Rect::from_corners([0, 0], [1, 1]), [0, SIZE])
            .is_err());
    }

    // Tests rectangle construction and containment
    // Verified by treating the max corner as inclusive
    #[test]
    fn test_rect() {
        let rect = Rect::from_corners([280, 400], [350, 530]);

        assert_eq!(
            rect,
            Rect {
                x: 280,
                y: 400,
                width: 70,
                height: 130
            }
        );
        assert!(rect.fits(350, 530));
        assert!(!rect.fits(349, 530));
        assert_eq!(Rect::from_corners([5, 5], [3, 9]).width, 0);
    }

    // Tests PNG encoding of the canvas
    // Verified by encoding without an alpha channel
    #[test]
    fn test_encode_png() {
        let mut canvas = Canvas::new(SIZE, SIZE);
        canvas.draw_over(&gradient(8, 8), [0, 0]);

        let bytes = canvas.encode_png().unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, canvas.into_image());
    }
}
