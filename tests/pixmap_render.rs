use std::time::Duration;

use trivert::prelude::*;

struct NoFrames;

impl FrameScheduler for NoFrames {
    fn request_redraw(&mut self, _delay: Duration) -> trivert::Result<()> {
        Ok(())
    }

    fn cancel(&mut self) {}
}

#[test]
fn test_idle_row_on_background() {
    let mut surface = PixmapSurface::new(600, 300).expect("pixmap");
    let mut renderer = Renderer::new();
    renderer.render(&mut surface, &mut NoFrames);

    let background = BACKGROUND_COLOR.to_rgba8();
    // Between two figures, far from any stroke
    assert_eq!(surface.pixel(150, 20), Some(background));

    // Bottom edge of every triangle runs through (center_x, 150 + r/2)
    let layout = NodeLayout::new(600.0, 300.0);
    let edge_y = (layout.center_y + layout.size / 2.0) as u32;
    for index in 0..NODE_COUNT {
        let x = layout.origin(index).x as u32;
        let pixel = surface.pixel(x, edge_y).expect("inside surface");
        assert_ne!(pixel, background, "node {index} edge not drawn");
    }
}

#[test]
fn test_frame_exports_to_png() {
    let mut surface = PixmapSurface::new(60, 30).expect("pixmap");
    Renderer::new().render(&mut surface, &mut NoFrames);

    let path = std::env::temp_dir().join(format!("trivert-frame-{}.png", std::process::id()));
    surface.save_png(&path).expect("save png");
    let decoded = image::open(&path).expect("decode").to_rgba8();
    assert_eq!(decoded.dimensions(), (60, 30));
    assert_eq!(decoded.get_pixel(0, 0).0, BACKGROUND_COLOR.to_rgba8());
    let _ = std::fs::remove_file(&path);
}
