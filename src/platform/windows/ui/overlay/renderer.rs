//! Direct2D overlay rendering.
//!
//! Anti-aliased rendering into a 32-bit DIB with per-pixel alpha, pushed to
//! the layered overlay window via UpdateLayeredWindow. Everything outside
//! the crosshair stays fully transparent.

use std::ffi::c_void;

use tracing::warn;
use windows::Win32::Foundation::{COLORREF, HWND, POINT, RECT, SIZE};
use windows::Win32::Graphics::Direct2D::Common::{
    D2D1_ALPHA_MODE_PREMULTIPLIED, D2D1_COLOR_F, D2D1_PIXEL_FORMAT, D2D_RECT_F, D2D_SIZE_U,
};
use windows::Win32::Graphics::Direct2D::{
    ID2D1DCRenderTarget, ID2D1Factory, ID2D1RenderTarget, ID2D1SolidColorBrush, ID2D1StrokeStyle,
    D2D1_ANTIALIAS_MODE_PER_PRIMITIVE, D2D1_BITMAP_INTERPOLATION_MODE_LINEAR,
    D2D1_BITMAP_PROPERTIES, D2D1_ELLIPSE, D2D1_RENDER_TARGET_PROPERTIES,
    D2D1_RENDER_TARGET_TYPE_DEFAULT, D2D1_RENDER_TARGET_USAGE_NONE,
};
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_B8G8R8A8_UNORM;
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC, SelectObject,
    AC_SRC_ALPHA, AC_SRC_OVER, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, BLENDFUNCTION,
    DIB_RGB_COLORS,
};
use windows::Win32::UI::WindowsAndMessaging::{UpdateLayeredWindow, ULW_ALPHA};
use windows_numerics::Vector2;

use crate::model::constants::CANVAS_SIZE;
use crate::model::CrosshairConfig;
use crate::render::{image_origin, plan, ImageCache, Point, Shape};

fn vec2(p: Point) -> Vector2 {
    Vector2::new(p.x, p.y)
}

fn pixel_format() -> D2D1_PIXEL_FORMAT {
    D2D1_PIXEL_FORMAT {
        format: DXGI_FORMAT_B8G8R8A8_UNORM,
        alphaMode: D2D1_ALPHA_MODE_PREMULTIPLIED,
    }
}

/// Draws crosshair configurations onto one layered window.
pub struct Renderer {
    factory: ID2D1Factory,
    images: ImageCache,
}

impl Renderer {
    pub fn new(factory: ID2D1Factory) -> Self {
        Self {
            factory,
            images: ImageCache::new(),
        }
    }

    pub fn forget_images(&mut self) {
        self.images.clear();
    }

    /// Render `config` and apply it to `hwnd`, keeping the window where it is.
    pub fn render(&mut self, hwnd: HWND, config: &CrosshairConfig) {
        unsafe { self.update_layered_window(hwnd, config) }
    }

    unsafe fn update_layered_window(&mut self, hwnd: HWND, config: &CrosshairConfig) {
        let width = CANVAS_SIZE;
        let height = CANVAS_SIZE;

        // Create a compatible DC and ARGB bitmap
        let screen_dc = GetDC(None);
        let mem_dc = CreateCompatibleDC(Some(screen_dc));

        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height, // Top-down
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut bits: *mut c_void = std::ptr::null_mut();
        let bitmap = match CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0)
        {
            Ok(bitmap) if !bits.is_null() => bitmap,
            _ => {
                warn!("Failed to create overlay bitmap");
                ReleaseDC(None, screen_dc);
                let _ = DeleteDC(mem_dc);
                return;
            }
        };
        let old_bitmap = SelectObject(mem_dc, bitmap.into());

        let rt_props = D2D1_RENDER_TARGET_PROPERTIES {
            r#type: D2D1_RENDER_TARGET_TYPE_DEFAULT,
            pixelFormat: pixel_format(),
            dpiX: 96.0,
            dpiY: 96.0,
            usage: D2D1_RENDER_TARGET_USAGE_NONE,
            minLevel: Default::default(),
        };

        match self.factory.CreateDCRenderTarget(&rt_props) {
            Ok(dc_rt) => self.draw(&dc_rt, mem_dc, config),
            Err(e) => warn!(error = %e, "Failed to create Direct2D render target"),
        }

        // Apply to window; no destination point keeps the current position
        let pt_src = POINT { x: 0, y: 0 };
        let size = SIZE {
            cx: width,
            cy: height,
        };
        let blend = BLENDFUNCTION {
            BlendOp: AC_SRC_OVER as u8,
            BlendFlags: 0,
            SourceConstantAlpha: 255,
            AlphaFormat: AC_SRC_ALPHA as u8,
        };

        if let Err(e) = UpdateLayeredWindow(
            hwnd,
            Some(screen_dc),
            None,
            Some(&size),
            Some(mem_dc),
            Some(&pt_src),
            COLORREF(0),
            Some(&blend),
            ULW_ALPHA,
        ) {
            warn!(error = %e, "UpdateLayeredWindow failed");
        }

        // Cleanup
        SelectObject(mem_dc, old_bitmap);
        let _ = DeleteObject(bitmap.into());
        let _ = DeleteDC(mem_dc);
        ReleaseDC(None, screen_dc);
    }

    unsafe fn draw(
        &mut self,
        dc_rt: &ID2D1DCRenderTarget,
        mem_dc: windows::Win32::Graphics::Gdi::HDC,
        config: &CrosshairConfig,
    ) {
        let rect = RECT {
            left: 0,
            top: 0,
            right: CANVAS_SIZE,
            bottom: CANVAS_SIZE,
        };
        if dc_rt.BindDC(mem_dc, &rect).is_err() {
            warn!("Failed to bind Direct2D render target");
            return;
        }
        let rt: ID2D1RenderTarget = dc_rt.clone().into();

        rt.BeginDraw();

        // Clear to transparent
        rt.Clear(Some(&D2D1_COLOR_F {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 0.0,
        }));
        rt.SetAntialiasMode(D2D1_ANTIALIAS_MODE_PER_PRIMITIVE);

        let (r, g, b) = config.color.to_unit_f32();
        let color = D2D1_COLOR_F { r, g, b, a: 1.0 };
        let brush: Option<ID2D1SolidColorBrush> = rt.CreateSolidColorBrush(&color, None).ok();

        for shape in plan(config) {
            match (&shape, brush.as_ref()) {
                (Shape::Line { from, to, width }, Some(brush)) => {
                    // No stroke style: flat caps, so lines end exactly at the size
                    rt.DrawLine(
                        vec2(*from),
                        vec2(*to),
                        brush,
                        *width,
                        None::<&ID2D1StrokeStyle>,
                    );
                }
                (Shape::Disc { center, diameter }, Some(brush)) => {
                    let ellipse = D2D1_ELLIPSE {
                        point: vec2(*center),
                        radiusX: diameter / 2.0,
                        radiusY: diameter / 2.0,
                    };
                    rt.FillEllipse(&ellipse, brush);
                }
                (
                    Shape::Ring {
                        center,
                        diameter,
                        width,
                    },
                    Some(brush),
                ) => {
                    let ellipse = D2D1_ELLIPSE {
                        point: vec2(*center),
                        radiusX: diameter / 2.0,
                        radiusY: diameter / 2.0,
                    };
                    rt.DrawEllipse(&ellipse, brush, *width, None::<&ID2D1StrokeStyle>);
                }
                (Shape::Image { path, center }, _) => self.draw_image(&rt, path, *center),
                (_, None) => {}
            }
        }

        if let Err(e) = rt.EndDraw(None, None) {
            warn!(error = %e, "Direct2D EndDraw failed");
        }
    }

    /// Native-size image centered on `center`; anything outside the canvas is clipped.
    unsafe fn draw_image(&mut self, rt: &ID2D1RenderTarget, path: &std::path::Path, center: Point) {
        let Some(image) = self.images.get(path) else {
            return;
        };

        let props = D2D1_BITMAP_PROPERTIES {
            pixelFormat: pixel_format(),
            dpiX: 96.0,
            dpiY: 96.0,
        };
        let size = D2D_SIZE_U {
            width: image.width,
            height: image.height,
        };
        let bitmap = match rt.CreateBitmap(
            size,
            Some(image.pixels.as_ptr() as *const c_void),
            image.stride(),
            &props,
        ) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                warn!(error = %e, "Failed to upload custom image");
                return;
            }
        };

        let origin = image_origin(center, image.width, image.height);
        let dest = D2D_RECT_F {
            left: origin.x,
            top: origin.y,
            right: origin.x + image.width as f32,
            bottom: origin.y + image.height as f32,
        };
        rt.DrawBitmap(
            &bitmap,
            Some(&dest),
            1.0,
            D2D1_BITMAP_INTERPOLATION_MODE_LINEAR,
            None,
        );
    }
}
