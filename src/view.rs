//! View transform for displaying a decoded image on a unit quad.
//!
//! Needs `std` for float trigonometry.
//!
//! A window host owns one [`ViewState`], feeds it [`ViewCommand`]s from key
//! presses and uploads [`ViewState::mvp`] as the quad's transform each
//! frame. Matrices are column-major `[[f32; 4]; 4]` (`m[column][row]`), the
//! layout GL uniform uploads expect with `transpose = false`.

use core::f32::consts::PI;

pub type Mat4 = [[f32; 4]; 4];

/// Angle of one rotate step: an eightieth of a turn.
pub const ROTATE_STEP: f32 = 2.0 * PI / 80.0;

/// Distance of one pan step in normalized device coordinates.
pub const PAN_STEP: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewCommand {
    Reset,
    RotateClockwise,
    RotateCounterClockwise,
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
}

impl ViewCommand {
    /// Default key bindings: `0` reset, `E`/`Q` rotate, `W`/`A`/`S`/`D` pan.
    /// Case-insensitive. Other keys (including the host's quit key) map to
    /// nothing.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            '0' => Some(Self::Reset),
            'e' => Some(Self::RotateClockwise),
            'q' => Some(Self::RotateCounterClockwise),
            'w' => Some(Self::PanUp),
            's' => Some(Self::PanDown),
            'a' => Some(Self::PanLeft),
            'd' => Some(Self::PanRight),
            _ => None,
        }
    }

    /// Whether holding the key repeats the command.
    pub fn repeats(self) -> bool {
        self != Self::Reset
    }

    fn step(self) -> Mat4 {
        match self {
            Self::Reset => identity(),
            Self::RotateClockwise => rotate_z(identity(), -ROTATE_STEP),
            Self::RotateCounterClockwise => rotate_z(identity(), ROTATE_STEP),
            Self::PanUp => translate(0.0, PAN_STEP, 0.0),
            Self::PanDown => translate(0.0, -PAN_STEP, 0.0),
            Self::PanLeft => translate(-PAN_STEP, 0.0, 0.0),
            Self::PanRight => translate(PAN_STEP, 0.0, 0.0),
        }
    }
}

/// Accumulated pan/rotate transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    transform: Mat4,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            transform: identity(),
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    /// Apply `cmd` on top of the current transform, in screen space.
    pub fn apply(&mut self, cmd: ViewCommand) {
        self.transform = match cmd {
            ViewCommand::Reset => identity(),
            _ => mul(&cmd.step(), &self.transform),
        };
    }

    /// Transform for the quad this frame. `image_aspect` is width over
    /// height (see [`crate::ppm::Header::aspect_ratio`]); the quad is
    /// squeezed horizontally so the image keeps its proportions.
    pub fn mvp(&self, image_aspect: f32) -> Mat4 {
        let projection = ortho(-image_aspect, image_aspect, -1.0, 1.0, 1.0, -1.0);
        mul(&self.transform, &projection)
    }
}

pub fn identity() -> Mat4 {
    let mut m = [[0.0; 4]; 4];
    for (i, col) in m.iter_mut().enumerate() {
        col[i] = 1.0;
    }
    m
}

/// `a * b`.
pub fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0; 4]; 4];
    for (c, col) in out.iter_mut().enumerate() {
        for (r, cell) in col.iter_mut().enumerate() {
            *cell = (0..4).map(|k| a[k][r] * b[c][k]).sum();
        }
    }
    out
}

pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = identity();
    m[3][0] = x;
    m[3][1] = y;
    m[3][2] = z;
    m
}

/// `m` followed by a rotation of `angle` radians about Z (`m * R`).
pub fn rotate_z(m: Mat4, angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let r = [
        [c, s, 0.0, 0.0],
        [-s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    mul(&m, &r)
}

pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let mut m = [[0.0; 4]; 4];
    m[0][0] = 2.0 / (right - left);
    m[1][1] = 2.0 / (top - bottom);
    m[2][2] = -2.0 / (far - near);
    m[3][0] = -(right + left) / (right - left);
    m[3][1] = -(top + bottom) / (top - bottom);
    m[3][2] = -(far + near) / (far - near);
    m[3][3] = 1.0;
    m
}
