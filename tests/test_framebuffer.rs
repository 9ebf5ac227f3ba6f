use flappy_tft::framebuffer::*;
use flappy_tft::hal::{Color, DrawSurface, PanelTransport};

#[test]
fn starts_black_and_clips_writes() {
    let mut fb = FrameBuffer::new(80, 160);
    assert!(fb.snapshot().iter().all(|&c| c == Color::BLACK));

    fb.pixel(-1, 0, Color::RED);
    fb.pixel(80, 0, Color::RED);
    fb.pixel(0, 160, Color::RED);
    assert_eq!(fb.revision(), 0);
    assert_eq!(fb.pixel_at(-1, 0), None);
    assert_eq!(fb.pixel_at(80, 159), None);

    fb.pixel(79, 159, Color::RED);
    assert_eq!(fb.pixel_at(79, 159), Some(Color::RED));
    assert_eq!(fb.revision(), 1);
}

#[test]
fn unchanged_writes_keep_revision() {
    let mut fb = FrameBuffer::new(8, 8);
    fb.pixel(1, 1, Color::WHITE);
    let rev = fb.revision();
    fb.pixel(1, 1, Color::WHITE);
    fb.clear(Color::BLACK);
    fb.clear(Color::BLACK);
    assert_eq!(fb.revision(), rev + 1);
}

#[test]
fn window_fills_row_by_row_and_wraps() {
    let mut fb = FrameBuffer::new(8, 8);
    fb.set_window(2, 3, 2, 2);
    for color in [Color::RED, Color::WHITE, Color::RED, Color::WHITE] {
        fb.push_pixel(color);
    }
    assert_eq!(fb.pixel_at(2, 3), Some(Color::RED));
    assert_eq!(fb.pixel_at(3, 3), Some(Color::WHITE));
    assert_eq!(fb.pixel_at(2, 4), Some(Color::RED));
    assert_eq!(fb.pixel_at(3, 4), Some(Color::WHITE));
    assert_eq!(fb.pixel_at(4, 3), Some(Color::BLACK));

    // Fifth pixel lands back at the window origin.
    fb.push_pixel(Color::WHITE);
    assert_eq!(fb.pixel_at(2, 3), Some(Color::WHITE));
}

#[test]
fn window_partly_off_panel_is_clipped() {
    let mut fb = FrameBuffer::new(4, 4);
    fb.set_window(3, 3, 2, 2);
    for _ in 0..4 {
        fb.push_pixel(Color::RED);
    }
    let red = fb.snapshot().iter().filter(|&&c| c == Color::RED).count();
    assert_eq!(red, 1);
    assert_eq!(fb.pixel_at(3, 3), Some(Color::RED));
}

#[test]
fn lines_and_rects() {
    let mut fb = FrameBuffer::new(10, 10);
    fb.line_h(-2, 0, 5, Color::RED);
    fb.line_v(9, 8, 5, Color::WHITE);
    fb.fill_rect(4, 4, 2, 3, Color::RED);

    assert_eq!(fb.pixel_at(2, 0), Some(Color::RED));
    assert_eq!(fb.pixel_at(3, 0), Some(Color::BLACK));
    assert_eq!(fb.pixel_at(9, 8), Some(Color::WHITE));
    assert_eq!(fb.pixel_at(9, 9), Some(Color::WHITE));
    assert_eq!(fb.pixel_at(5, 6), Some(Color::RED));
    assert_eq!(fb.pixel_at(6, 6), Some(Color::BLACK));
    assert_eq!(fb.pixel_at(5, 7), Some(Color::BLACK));
}

#[test]
fn text_is_drawn_in_text_colour_and_advances_cursor() {
    let mut fb = FrameBuffer::new(80, 40);
    fb.set_text_color(Color::RED);
    fb.set_cursor(3, 5);
    fb.print("AB");

    assert_eq!(fb.text_cursor(), (15, 5));
    for y in 0..40 {
        for x in 0..80 {
            let c = fb.pixel_at(x, y).unwrap();
            let inside = (3..15).contains(&x) && (5..15).contains(&y);
            if !inside {
                assert_eq!(c, Color::BLACK, "stray text pixel at {},{}", x, y);
            } else {
                assert!(c == Color::BLACK || c == Color::RED);
            }
        }
    }
    let lit = fb.snapshot().iter().filter(|&&c| c == Color::RED).count();
    assert!(lit > 10);

    // Printing continues where the previous text ended.
    fb.print_fmt(format_args!("{}", 42));
    assert_eq!(fb.text_cursor(), (27, 5));
}

#[test]
fn text_background_is_transparent() {
    let mut fb = FrameBuffer::new(20, 20);
    fb.clear(Color::WHITE);
    fb.set_text_color(Color::RED);
    fb.set_cursor(0, 0);
    fb.print("I");
    let white = fb.snapshot().iter().filter(|&&c| c == Color::WHITE).count();
    assert!(white > 20 * 20 - 6 * 10);
}

#[test]
fn panel_commands_change_what_is_visible() {
    let mut fb = FrameBuffer::new(4, 4);
    fb.pixel(0, 0, Color::RED);

    fb.write_command(INVON, &[]);
    assert!(fb.is_inverted());
    assert_eq!(fb.visible_pixel(0, 0), Color::RED.inverted());
    assert_eq!(fb.pixel_at(0, 0), Some(Color::RED));
    fb.write_command(INVOFF, &[]);
    assert_eq!(fb.visible_pixel(0, 0), Color::RED);

    fb.write_command(DISPOFF, &[]);
    assert!(!fb.is_display_on());
    assert_eq!(fb.visible_pixel(0, 0), Color::BLACK);
    fb.write_command(DISPON, &[]);
    assert_eq!(fb.visible_pixel(0, 0), Color::RED);
}

#[test]
fn reset_clears_panel_state() {
    let mut fb = FrameBuffer::new(4, 4);
    fb.clear(Color::WHITE);
    fb.write_command(INVON, &[]);
    fb.write_command(DISPOFF, &[]);

    fb.write_command(SWRESET, &[]);
    assert!(!fb.is_inverted());
    assert!(fb.is_display_on());
    assert!(fb.snapshot().iter().all(|&c| c == Color::BLACK));
}

#[test]
fn unknown_commands_are_ignored() {
    let mut fb = FrameBuffer::new(4, 4);
    let rev = fb.revision();
    fb.write_command(0x36, &[0xc8]);
    assert_eq!(fb.revision(), rev);
    assert!(!fb.is_inverted());
}

#[test]
fn colour_conversions() {
    assert_eq!(Color::rgb(255, 255, 255), Color::WHITE);
    assert_eq!(Color::rgb(255, 0, 0), Color::RED);
    assert_eq!(Color::WHITE.to_rgb888(), (255, 255, 255));
    assert_eq!(Color::RED.to_rgb888(), (255, 0, 0));
    assert_eq!(Color::BLACK.inverted(), Color::WHITE);
}
