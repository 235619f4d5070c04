use glam::Vec2;

/// Viewer state in world space, snapshotted once per frame.
///
/// * `dir` is the unit facing vector; `plane` spans half the horizontal
///   field of view, perpendicular to `dir` per ray-casting convention.
/// * The caster never validates the pair — garbage in yields garbage rays.
#[derive(Clone, Copy, Debug)]
pub struct Viewer {
    pub pos: Vec2,   // map units
    pub dir: Vec2,   // unit facing vector
    pub plane: Vec2, // camera plane, |plane| = tan(fov/2)
}

impl Viewer {
    pub fn new(pos: Vec2, dir: Vec2, plane: Vec2) -> Self {
        Self { pos, dir, plane }
    }

    /// Derive `dir`/`plane` from a heading and a horizontal FoV in radians.
    pub fn from_yaw(pos: Vec2, yaw: f32, fov: f32) -> Self {
        let dir = Vec2::from_angle(yaw);
        let plane = dir.perp() * (fov * 0.5).tan();
        Self { pos, dir, plane }
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move by `forward` map units along `dir` and `side` units of strafe.
    pub fn step(&mut self, forward: f32, side: f32) {
        self.pos += self.dir * forward + self.dir.perp() * side;
    }

    /// Rotate heading by `delta_yaw` radians; the plane turns with it.
    pub fn turn(&mut self, delta_yaw: f32) {
        let rot = Vec2::from_angle(delta_yaw);
        self.dir = rot.rotate(self.dir);
        self.plane = rot.rotate(self.plane);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
