//! Tests for mosaic orchestration, background painting and ordered merging

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use rand::SeedableRng;
    use sprinkle::algorithm::gradient::gradient_color_at;
    use rand::rngs::StdRng;
    use sprinkle::algorithm::compositor::{
        MosaicCompositor, Silent, background_region, canvas_dimensions, paint_background,
        render_mosaic,
    };
    use sprinkle::io::configuration::{MAX_CANVAS_DIMENSION, MosaicConfig};
    use sprinkle::io::error::{ErrorKind, MosaicError};
    use sprinkle::spatial::region::Region;

    fn gradient_source(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, 90, 255])
        })
    }

    fn config(iterations: usize, scale: f64) -> MosaicConfig {
        MosaicConfig {
            iterations,
            scale,
            ..MosaicConfig::default()
        }
    }

    // Tests canvas size is the rounded scaled source size
    // Verified by truncating the scaled dimensions
    #[test]
    fn test_canvas_dimensions_rounding() {
        assert!(matches!(canvas_dimensions(10, 6, 1.5), Ok((15, 9))));
        assert!(matches!(canvas_dimensions(3, 5, 0.5), Ok((2, 3))));
        assert!(matches!(canvas_dimensions(7, 7, 1.0), Ok((7, 7))));
    }

    // Tests scales yielding empty or oversized canvases are rejected
    // Verified by removing the lower bound check
    #[test]
    fn test_canvas_dimensions_rejects_degenerate_scale() {
        let error = canvas_dimensions(3, 3, 0.1).err();
        assert!(matches!(
            error,
            Some(MosaicError::InvalidParameter {
                parameter: "scale",
                ..
            })
        ));
        assert!(canvas_dimensions(MAX_CANVAS_DIMENSION, 1, 2.0).is_err());
    }

    // Tests the background square is centred on the canvas
    // Verified by anchoring the square at the origin
    #[test]
    fn test_background_region_centring() {
        assert_eq!(background_region(10, 4), Region::new(0, -3, 10, 10));
        assert_eq!(background_region(4, 10), Region::new(-3, 0, 10, 10));
        assert_eq!(background_region(5, 5), Region::new(0, 0, 5, 5));
        assert_eq!(background_region(6, 3), Region::new(0, -1, 6, 6));
    }

    // Tests the background leaves no transparent gaps
    // Verified by compositing the background at half opacity
    #[test]
    fn test_background_covers_canvas() {
        let source = gradient_source(9, 5);
        let mut canvas = RgbaImage::new(9, 5);
        paint_background(&source, &mut canvas);
        assert!(canvas.pixels().all(|p| p[3] == 255));
    }

    // Tests construction queues every tile without painting them
    // Verified by painting a tile during construction
    #[test]
    fn test_new_compositor_state() {
        let source = gradient_source(20, 12);
        let mut rng = StdRng::seed_from_u64(5);
        let compositor = MosaicCompositor::new(&source, config(25, 2.0), &mut rng)
            .unwrap_or_else(|e| unreachable!("valid configuration rejected: {e}"));

        assert_eq!(compositor.canvas().dimensions(), (40, 24));
        assert_eq!(compositor.placements().len(), 25);
        assert_eq!(compositor.composited(), 0);
        assert!(!compositor.is_finished());
    }

    // Tests invalid configurations abort before any work
    // Verified by validating after canvas allocation
    #[test]
    fn test_new_rejects_invalid_config() {
        let source = gradient_source(4, 4);
        let mut rng = StdRng::seed_from_u64(0);
        let invalid = MosaicConfig {
            opacity: 1.5,
            ..MosaicConfig::default()
        };

        let error = MosaicCompositor::new(&source, invalid, &mut rng).err();
        assert!(error.is_some_and(|e| e.kind() == ErrorKind::Config));
    }

    // Tests empty sources are rejected as input errors
    // Verified by allowing zero-sized sources through
    #[test]
    fn test_new_rejects_empty_source() {
        let source = RgbaImage::new(0, 3);
        let mut rng = StdRng::seed_from_u64(0);

        let error = MosaicCompositor::new(&source, MosaicConfig::default(), &mut rng).err();
        assert!(matches!(error, Some(MosaicError::EmptySource { .. })));
    }

    // Tests sequential and batched merging produce the same canvas
    // Verified by merging batch tiles in reverse order
    #[test]
    fn test_batched_matches_sequential() {
        let source = gradient_source(32, 24);
        let settings = MosaicConfig {
            iterations: 60,
            opacity: 0.7,
            scale: 1.0,
            blur: 3.0,
        };

        let mut sequential =
            MosaicCompositor::new(&source, settings, &mut StdRng::seed_from_u64(21))
                .unwrap_or_else(|e| unreachable!("valid configuration rejected: {e}"));
        let mut painted = Vec::new();
        while let Some(placement) = sequential.composite_next() {
            painted.push(placement);
        }
        assert_eq!(painted.as_slice(), sequential.placements());
        assert!(sequential.is_finished());

        let batched = MosaicCompositor::new(&source, settings, &mut StdRng::seed_from_u64(21))
            .unwrap_or_else(|e| unreachable!("valid configuration rejected: {e}"));

        assert_eq!(sequential.finish(), batched.run(&mut Silent));
    }

    // Tests batches stop at the end of the placement list
    // Verified by ignoring the batch size limit
    #[test]
    fn test_composite_batch_limits() {
        let source = gradient_source(16, 16);
        let mut compositor =
            MosaicCompositor::new(&source, config(10, 1.0), &mut StdRng::seed_from_u64(8))
                .unwrap_or_else(|e| unreachable!("valid configuration rejected: {e}"));

        assert_eq!(compositor.composite_batch(4, &mut Silent), 4);
        assert_eq!(compositor.composite_batch(4, &mut Silent), 4);
        assert_eq!(compositor.composite_batch(4, &mut Silent), 2);
        assert_eq!(compositor.composite_batch(4, &mut Silent), 0);
        assert_eq!(compositor.composited(), 10);
    }

    // Tests the observer hears about every tile in order
    // Verified by notifying once per batch
    #[test]
    fn test_observer_notifications() {
        let source = gradient_source(12, 12);
        let mut seen = Vec::new();
        let mut observer = |completed: usize, total: usize| seen.push((completed, total));

        let mosaic = render_mosaic(
            &source,
            &config(45, 1.0),
            &mut StdRng::seed_from_u64(2),
            &mut observer,
        );

        assert!(mosaic.is_ok());
        let expected: Vec<(usize, usize)> = (1..=45).map(|n| (n, 45)).collect();
        assert_eq!(seen, expected);
    }

    // Tests seeded runs are reproducible
    // Verified by seeding placements from the thread generator
    #[test]
    fn test_render_reproducible_with_seed() {
        let source = gradient_source(24, 18);
        let settings = config(80, 1.25);

        let first = render_mosaic(&source, &settings, &mut StdRng::seed_from_u64(99), &mut Silent);
        let second = render_mosaic(&source, &settings, &mut StdRng::seed_from_u64(99), &mut Silent);

        assert!(first.is_ok());
        assert_eq!(first.ok(), second.ok());
    }

    // Tests a tiny blur renders instead of allocating whole gigantic tiles
    // Verified by synthesizing full tiles before clipping to the canvas
    #[test]
    fn test_tiny_blur_renders_within_canvas() {
        let source = gradient_source(10, 10);
        let settings = MosaicConfig {
            iterations: 3,
            blur: 1e-6,
            ..MosaicConfig::default()
        };
        assert!(settings.validate().is_ok());

        let mosaic = render_mosaic(&source, &settings, &mut StdRng::seed_from_u64(0), &mut Silent);

        assert!(mosaic.is_ok_and(|image| image.dimensions() == (10, 10)));
    }

    // Tests scaled tiles keep the unscaled origin and grow their side
    // Verified by multiplying the placement origin by the scale
    #[test]
    fn test_scaled_tile_footprint() {
        let source = RgbaImage::from_pixel(4, 4, Rgba([200, 40, 40, 128]));
        let settings = MosaicConfig {
            iterations: 1,
            opacity: 0.5,
            scale: 2.0,
            blur: 2.0,
        };

        for seed in 0..12 {
            let mut compositor =
                MosaicCompositor::new(&source, settings, &mut StdRng::seed_from_u64(seed))
                    .unwrap_or_else(|e| unreachable!("valid configuration rejected: {e}"));
            assert!(compositor.canvas().pixels().all(|p| p[3] == 128));

            let placement = compositor.placements()[0];
            let reach = i64::from(placement.output_side(2.0));
            assert_eq!(reach, 2 * i64::from(placement.side));
            assert_eq!(compositor.composite_next(), Some(placement));

            for (cx, cy, pixel) in compositor.canvas().enumerate_pixels() {
                let (cx, cy) = (i64::from(cx), i64::from(cy));
                let covered = (placement.x..placement.x + reach).contains(&cx)
                    && (placement.y..placement.y + reach).contains(&cy);
                assert_eq!(
                    pixel[3] != 128,
                    covered,
                    "seed {seed}, pixel ({cx}, {cy}), placement {placement:?}"
                );
            }
        }
    }

    // Tests the background samples the source at the canvas-space offset
    // Verified by sampling the source square at the origin
    #[test]
    fn test_background_samples_canvas_offset() {
        let source = RgbaImage::from_fn(4, 4, |_, y| Rgba([(60 * y) as u8, 0, 0, 255]));
        let mut canvas = RgbaImage::new(12, 2);
        assert_eq!(background_region(12, 2), Region::new(0, -5, 12, 12));

        paint_background(&source, &mut canvas);

        // Top quadrants clamp onto every row, bottom ones onto rows 1 to 3
        let colors = [
            [90.0, 0.0, 0.0, 255.0],
            [90.0, 0.0, 0.0, 255.0],
            [120.0, 0.0, 0.0, 255.0],
            [120.0, 0.0, 0.0, 255.0],
        ];
        for (cx, cy, pixel) in canvas.enumerate_pixels() {
            let color = gradient_color_at(&colors, f64::from(cx), f64::from(cy) + 5.0, 12.0);
            let expected = Rgba(color.map(|value| value.round() as u8));
            assert_eq!(*pixel, expected, "pixel ({cx}, {cy})");
        }
    }
}
