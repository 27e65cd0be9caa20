//! Floating damage numbers: age them and drop the faded ones.

use hecs::World;

use geneforge_core::components::DamageText;

pub fn run(world: &mut World, dt: f64) {
    let mut faded = Vec::new();
    for (entity, text) in world.query_mut::<&mut DamageText>() {
        text.age_secs += dt;
        if text.age_secs >= text.fade_secs {
            faded.push(entity);
        }
    }
    for entity in faded {
        let _ = world.despawn(entity);
    }
}
