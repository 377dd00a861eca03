//! Vertically wrapping background layers.

use bevy::prelude::*;

/// One scrolling layer. The image is drawn at `offset` and at
/// `offset - wrap` so the seam never shows.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct ScrollLayer {
    offset: f32,
    speed: f32,
    wrap: f32,
}

impl ScrollLayer {
    pub fn new(speed: f32, wrap: f32) -> Self {
        Self {
            offset: 0.0,
            speed,
            wrap,
        }
    }

    #[cfg(test)]
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn advance(&mut self) {
        self.offset += self.speed;
        // reset, not modulo
        if self.offset >= self.wrap {
            self.offset = 0.0;
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn wrap(&self) -> f32 {
        self.wrap
    }

    /// Screen-space y of both copies.
    #[cfg(test)]
    pub fn copies(&self) -> [f32; 2] {
        [self.offset, self.offset - self.wrap]
    }

    /// World translation for the layer's parent entity. The second copy is a
    /// child placed one `wrap` above it.
    pub fn translation(&self, z: f32) -> Vec3 {
        Vec3::new(0.0, -self.offset, z)
    }
}

/// Spawns a layer as a parent holding the two image copies.
pub fn spawn_layer(
    cmd: &mut Commands,
    layer: ScrollLayer,
    sprite: (Sprite, crate::assets::Placeholder),
    z: f32,
) -> Entity {
    cmd.spawn((Transform::from_translation(layer.translation(z)), Visibility::Visible))
        .with_children(|p| {
            p.spawn((sprite.0.clone(), sprite.1.clone(), Transform::default()));
            p.spawn((
                sprite.0,
                sprite.1,
                Transform::from_xyz(0.0, layer.wrap(), 0.0),
            ));
        })
        .id()
}

/// Advances self-driven layers once per fixed tick.
pub fn advance_layers(mut layers: Query<(&mut ScrollLayer, &mut Transform)>) {
    for (mut layer, mut t) in layers.iter_mut() {
        layer.advance();
        t.translation = layer.translation(t.translation.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_by_reset_not_modulo() {
        let mut layer = ScrollLayer::new(1.5, 600.0).with_offset(599.0);
        layer.advance();
        assert_eq!(layer.offset(), 0.0);
    }

    #[test]
    fn offset_stays_in_range() {
        for speed in [1.0, 1.5, 2.5, 7.0] {
            let mut layer = ScrollLayer::new(speed, 600.0);
            for _ in 0..5000 {
                layer.advance();
                assert!(layer.offset() >= 0.0 && layer.offset() < 600.0);
            }
        }
    }

    #[test]
    fn copies_sit_one_wrap_apart() {
        let mut layer = ScrollLayer::new(2.5, 600.0);
        for _ in 0..10 {
            layer.advance();
        }
        assert_eq!(layer.copies(), [25.0, -575.0]);
        assert_eq!(layer.translation(2.0), Vec3::new(0.0, -25.0, 2.0));
    }
}
