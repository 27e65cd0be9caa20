//! Knockback system: applies melee knockback and advances every running
//! knockback routine (velocity buffers, body physics, controller pushes,
//! projectile slides), then settles character controllers under gravity.

use hecs::{Entity, World};

use geneforge_combat::knockback::{
    apply_body_impulse, resolve_method, ControllerKnockback, KnockbackCapabilities,
    KnockbackReceiver, SlideKnockback,
};
use geneforge_core::components::*;
use geneforge_core::constants::*;
use geneforge_core::enums::KnockbackMethod;
use geneforge_core::events::SimEvent;
use geneforge_core::types::{ActorId, Position};
use geneforge_enemy_ai::profiles::AgentProfile;
use glam::DVec3;

/// Controller knockback started by an attacker. Lives on the attacker, so a
/// new push from the same attacker replaces (cancels) the previous one.
#[derive(Debug, Clone)]
pub struct ControllerPush {
    pub target: Entity,
    pub routine: ControllerKnockback,
}

/// Knockback capabilities of an entity.
pub fn capabilities(world: &World, entity: Entity) -> KnockbackCapabilities {
    KnockbackCapabilities {
        receiver: world.get::<&KnockbackReceiver>(entity).is_ok(),
        body: world.get::<&RigidBody>(entity).is_ok(),
        controller_enabled: world
            .get::<&CharacterController>(entity)
            .map(|c| c.enabled)
            .unwrap_or(false),
    }
}

/// Hand a melee impulse to the first capability the target has.
/// Returns the method used, or None when the target can't be knocked back.
pub fn apply_melee_knockback(
    world: &mut World,
    attacker: Entity,
    target: Entity,
    target_id: ActorId,
    impulse: DVec3,
    profile: &AgentProfile,
    events: &mut Vec<SimEvent>,
) -> Option<KnockbackMethod> {
    let Some(method) = resolve_method(capabilities(world, target)) else {
        log::debug!("{target_id} has no knockback capability, skipping");
        return None;
    };

    match method {
        KnockbackMethod::Receiver => {
            if let Ok(mut receiver) = world.get::<&mut KnockbackReceiver>(target) {
                receiver.apply_impulse(impulse);
            }
        }
        KnockbackMethod::Body => {
            if let Ok(mut body) = world.get::<&mut RigidBody>(target) {
                apply_body_impulse(&mut body, impulse, profile.knockback_max_speed);
            }
        }
        KnockbackMethod::Controller => {
            let push = ControllerPush {
                target,
                routine: ControllerKnockback::new(
                    impulse,
                    profile.controller_knockback_secs,
                    profile.controller_knockback_decay,
                ),
            };
            let _ = world.insert_one(attacker, push);
        }
    }

    events.push(SimEvent::KnockbackApplied {
        target: target_id,
        method,
    });
    Some(method)
}

/// Advance all knockback routines by `dt`.
pub fn run(world: &mut World, dt: f64) {
    step_receivers(world, dt);
    step_bodies(world, dt);
    step_controller_pushes(world, dt);
    step_slides(world, dt);
    settle_controllers(world, dt);
}

fn step_receivers(world: &mut World, dt: f64) {
    for (_entity, (receiver, pos, controller)) in world.query_mut::<(
        &mut KnockbackReceiver,
        &mut Position,
        Option<&CharacterController>,
    )>() {
        let displacement = receiver.step(dt);
        match controller {
            Some(controller) if receiver.use_controller && controller.enabled => {
                move_with_controller(pos, controller, displacement)
            }
            _ => *pos = pos.offset(displacement),
        }
    }
}

fn step_bodies(world: &mut World, dt: f64) {
    for (_entity, (body, pos, controller)) in
        world.query_mut::<(&mut RigidBody, &mut Position, Option<&CharacterController>)>()
    {
        let floor = controller.map(|c| c.grounded_z).unwrap_or(0.0);
        let mut velocity = DVec3::from(body.velocity);
        velocity.z += BODY_GRAVITY * dt;

        *pos = pos.offset(velocity * dt);
        if pos.z <= floor {
            pos.z = floor;
            velocity.z = velocity.z.max(0.0);
        }

        let keep = (1.0 - body.drag * dt).clamp(0.0, 1.0);
        velocity.x *= keep;
        velocity.y *= keep;
        body.velocity = velocity.into();
    }
}

fn step_controller_pushes(world: &mut World, dt: f64) {
    let pushes: Vec<(Entity, Entity)> = world
        .query::<&ControllerPush>()
        .iter()
        .map(|(attacker, push)| (attacker, push.target))
        .collect();

    let mut finished = Vec::new();
    for (attacker, target) in pushes {
        // The routine stops early once the target's controller is gone or disabled
        let controller = world
            .get::<&CharacterController>(target)
            .ok()
            .filter(|c| c.enabled)
            .map(|c| *c);
        let Some(controller) = controller else {
            finished.push(attacker);
            continue;
        };

        let (displacement, done) = match world.get::<&mut ControllerPush>(attacker) {
            Ok(mut push) => {
                let displacement = push.routine.step(dt);
                (displacement, push.routine.is_finished())
            }
            Err(_) => continue,
        };
        if let Ok(mut pos) = world.get::<&mut Position>(target) {
            move_with_controller(&mut pos, &controller, displacement);
        }
        if done {
            finished.push(attacker);
        }
    }

    for attacker in finished {
        let _ = world.remove_one::<ControllerPush>(attacker);
    }
}

fn step_slides(world: &mut World, dt: f64) {
    let mut finished = Vec::new();
    for (entity, (slide, pos)) in world.query_mut::<(&mut SlideKnockback, &mut Position)>() {
        *pos = pos.offset(slide.step(dt));
        if slide.is_finished() {
            finished.push(entity);
        }
    }
    for entity in finished {
        let _ = world.remove_one::<SlideKnockback>(entity);
    }
}

/// Gravity for airborne controllers; grounded ones keep a small downward
/// speed so they stay in floor contact.
fn settle_controllers(world: &mut World, dt: f64) {
    for (_entity, (controller, pos)) in world
        .query_mut::<(&mut CharacterController, &mut Position)>()
        .without::<&RigidBody>()
    {
        if !controller.enabled {
            continue;
        }
        let grounded = pos.z <= controller.grounded_z;
        if grounded {
            if controller.vertical_speed < 0.0 {
                controller.vertical_speed = CONTROLLER_GROUNDED_SPEED;
            }
        } else {
            controller.vertical_speed += CONTROLLER_GRAVITY * dt;
        }
        pos.z = (pos.z + controller.vertical_speed * dt).max(controller.grounded_z);
    }
}

/// Controller move: free horizontally, never below the floor.
fn move_with_controller(pos: &mut Position, controller: &CharacterController, delta: DVec3) {
    pos.x += delta.x;
    pos.y += delta.y;
    pos.z = (pos.z + delta.z).max(controller.grounded_z);
}
