use bevy::prelude::*;

use crate::{
    config::StageConfig,
    frame::{compose_frame, FrameGeometry},
    note::Chart,
    position::RenderContext,
    window::WindowSeeker,
};

/// Recomposes [`FrameGeometry`] every update from the [`Chart`],
/// [`RenderContext`] and [`StageConfig`] resources. Hosts advance
/// `RenderContext::now` and read the geometry back out to draw it.
pub struct StagePlugin;

impl Plugin for StagePlugin {
    fn build(&self, game: &mut App) {
        game.init_resource::<StageConfig>()
            .init_resource::<RenderContext>()
            .init_resource::<Chart>()
            .init_resource::<WindowSeeker>()
            .init_resource::<FrameGeometry>()
            .add_system(stage_frame);
    }
}

pub fn stage_frame(
    chart: Res<Chart>,
    context: Res<RenderContext>,
    config: Res<StageConfig>,
    mut seeker: ResMut<WindowSeeker>,
    mut frame: ResMut<FrameGeometry>,
) {
    if chart.is_changed() || config.is_changed() {
        seeker.reset();
    }

    let window = seeker.seek(&chart, context.now, &config);
    *frame = compose_frame(&chart, &context, &config, window);
}
