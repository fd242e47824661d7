use std::str::FromStr;

use gtk4::{
    cairo::{self, Context},
    gdk::RGBA,
};

pub struct CairoShapesExt;
impl CairoShapesExt {
    pub fn rounded_rectangle(ctx: &Context, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        let rad = radius.min(width / 2.0).min(height / 2.0).max(0.0);

        ctx.new_sub_path();
        ctx.move_to(x + rad, y);
        ctx.line_to(x + width - rad, y);
        ctx.arc(
            x + width - rad,
            y + rad,
            rad,
            -90_f64.to_radians(),
            0_f64.to_radians(),
        );
        ctx.line_to(x + width, y + height - rad);
        ctx.arc(
            x + width - rad,
            y + height - rad,
            rad,
            0_f64.to_radians(),
            90_f64.to_radians(),
        );
        ctx.line_to(x + rad, y + height);
        ctx.arc(
            x + rad,
            y + height - rad,
            rad,
            90_f64.to_radians(),
            180_f64.to_radians(),
        );
        ctx.line_to(x, y + rad);
        ctx.arc(
            x + rad,
            y + rad,
            rad,
            180_f64.to_radians(),
            270_f64.to_radians(),
        );
        ctx.close_path();
    }

    pub fn circle(ctx: &Context, x: f64, y: f64, radius: f64) -> Result<(), cairo::Error> {
        ctx.new_path();
        ctx.arc(x, y, radius, 0.0, 2.0 * std::f64::consts::PI);
        ctx.close_path();
        ctx.fill()
    }

    /// Draws `text` starting at `x`, cut with an ellipsis so it fits `max_width`.
    pub fn clipped_text(
        ctx: &Context,
        text: &str,
        x: f64,
        y: f64,
        max_width: f64,
    ) -> Result<(), cairo::Error> {
        ctx.move_to(x, y);
        if ctx.text_extents(text)?.width() <= max_width {
            return ctx.show_text(text);
        }
        let mut shown = text.to_string();
        loop {
            shown.pop();
            if shown.is_empty() {
                return Ok(());
            }
            let candidate = format!("{shown}…");
            if ctx.text_extents(&candidate)?.width() <= max_width {
                return ctx.show_text(&candidate);
            }
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64, // 0.0 to 1.0
    pub g: f64,
    pub b: f64,
    pub a: f64,
}
impl Rgba {
    pub fn set_source(&self, ctx: &Context, alpha: f64) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a * alpha);
    }
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (self.r * 255.0).round(),
            (self.g * 255.0).round(),
            (self.b * 255.0).round(),
            self.a
        )
    }
}

// let color: Rgba = "#ff0000".parse()?;
impl FromStr for Rgba {
    type Err = ();

    fn from_str(hex: &str) -> Result<Self, Self::Err> {
        let hex = hex.trim_start_matches('#');
        let len = hex.len();
        if (len != 6 && len != 8) || !hex.is_ascii() {
            return Err(());
        }

        let channel =
            |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map(|v| v as f64 / 255.0);
        let r = channel(0).map_err(|_| ())?;
        let g = channel(2).map_err(|_| ())?;
        let b = channel(4).map_err(|_| ())?;
        let a = if len == 8 {
            channel(6).map_err(|_| ())?
        } else {
            1.0
        };

        Ok(Self { r, g, b, a })
    }
}

impl From<RGBA> for Rgba {
    fn from(v: RGBA) -> Self {
        Self {
            r: v.red() as f64,
            g: v.green() as f64,
            b: v.blue() as f64,
            a: v.alpha() as f64,
        }
    }
}
