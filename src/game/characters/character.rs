// Character adapter: controller + physics body + abilities + animation

use crate::engine::input::InputSnapshot;
use crate::engine::physics::KinematicBackend;
use crate::game::abilities::{AbilityTree, BehaviorHost, ContainerId, NodeId};
use crate::game::movement::{MovementController, TickOutput};
use glam::Vec3;
use log::warn;

use super::animation::LocomotionAnimator;

/// A playable character bound to one body in a `KinematicBackend`
pub struct Character<B: KinematicBackend> {
    /// Character name (for display and logs)
    pub name: String,
    /// Handle to the character's body in the backend
    body: B::Handle,
    controller: MovementController,
    animator: LocomotionAnimator,
    abilities: AbilityTree,
    behaviors: BehaviorHost,
    /// Floor contact reported by the last move-and-slide
    grounded: bool,
}

impl<B: KinematicBackend> Character<B> {
    pub fn new(name: &str, body: B::Handle, controller: MovementController) -> Self {
        Self {
            name: name.to_string(),
            body,
            controller,
            animator: LocomotionAnimator::default(),
            abilities: AbilityTree::new(),
            behaviors: BehaviorHost::new(),
            grounded: false,
        }
    }

    pub fn with_animator(mut self, animator: LocomotionAnimator) -> Self {
        self.animator = animator;
        self
    }

    pub fn with_abilities(mut self, abilities: AbilityTree) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn body(&self) -> B::Handle {
        self.body
    }

    pub fn controller(&self) -> &MovementController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MovementController {
        &mut self.controller
    }

    pub fn animator(&self) -> &LocomotionAnimator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut LocomotionAnimator {
        &mut self.animator
    }

    pub fn abilities(&self) -> &AbilityTree {
        &self.abilities
    }

    pub fn abilities_mut(&mut self) -> &mut AbilityTree {
        &mut self.abilities
    }

    pub fn behaviors(&self) -> &BehaviorHost {
        &self.behaviors
    }

    pub fn behaviors_mut(&mut self) -> &mut BehaviorHost {
        &mut self.behaviors
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Drop any startup velocity and phase state
    pub fn ready(&mut self) {
        self.controller.reset();
        self.grounded = false;
    }

    /// Unlock a node and activate its behavior container, if any
    pub fn unlock(&mut self, node: NodeId) -> Option<ContainerId> {
        self.abilities.try_activate(node, &mut self.behaviors)
    }

    /// Whether `node` could be unlocked right now
    pub fn can_unlock(&self, node: NodeId) -> bool {
        self.abilities.can_unlock(node)
    }

    /// Deactivate a behavior container; it stays attached
    pub fn deactivate(&mut self, container: Option<ContainerId>) {
        self.abilities.deactivate(&mut self.behaviors, container);
    }

    /// Position of the character's feet
    pub fn position(&self, backend: &B) -> Option<Vec3> {
        backend.position(self.body)
    }

    /// Run one physics tick
    ///
    /// Movement runs against the previous slide's floor contact, the velocity
    /// is integrated by the backend and written back, then active ability
    /// behaviors are processed.
    pub fn physics_tick(&mut self, backend: &mut B, input: &InputSnapshot, delta: f32) -> TickOutput {
        let output = self.controller.tick(delta, input, self.grounded);
        for event in &output.events {
            self.animator.handle(event);
        }

        let up = self.controller.up();
        match backend.move_and_slide(self.body, output.velocity, up, delta) {
            Some(slide) => {
                self.controller.sync_body(slide.velocity);
                self.grounded = slide.grounded;
            }
            None => warn!("Character '{}' has no physics body", self.name),
        }

        self.behaviors.process(delta);
        output
    }
}
