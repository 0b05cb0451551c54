use log::{debug, info};
use macroquad::math::Vec3;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ParticleError {
    #[error("Particle mass must be positive, got {0}")]
    NonPositiveMass(f32),
    #[error("Time step must be positive, got {0}")]
    NonPositiveTimeStep(f32),
}

/// Point mass integrated with explicit Euler steps
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    mass: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Force accumulated since the last reset
    force: Vec3,
    pub name: String,
}

impl Particle {
    pub fn new(mass: f32, position: Vec3, velocity: Vec3, name: &str) -> Result<Self, ParticleError> {
        if !(mass > 0.0) {
            return Err(ParticleError::NonPositiveMass(mass));
        }
        Ok(Particle {
            mass,
            position,
            velocity,
            force: Vec3::ZERO,
            name: name.to_string(),
        })
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn force(&self) -> Vec3 {
        self.force
    }

    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    pub fn reset_forces(&mut self) {
        self.force = Vec3::ZERO;
    }

    /// v += F/m * dt
    pub fn update_velocity(&mut self, dt: f32) {
        self.velocity += self.force / self.mass * dt;
    }

    /// p += v * dt
    pub fn update_position(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

/// Owns the particles and advances them in lock step
/// Gravity and damping are both zero: the player drives the particle through its velocity
#[derive(Debug, Default)]
pub struct Simulation {
    particles: Vec<Particle>,
}

impl Simulation {
    pub fn new() -> Self {
        Simulation { particles: Vec::new() }
    }

    /// Reset to a single resting particle at the origin
    pub fn initialize(&mut self) {
        self.particles.clear();
        // mass is a positive literal
        self.particles.push(Particle {
            mass: 10.0,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            name: "CentralParticle".to_string(),
        });
        info!("Initialized simulation with {} particle(s)", self.particles.len());
    }

    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Advance every particle by `dt` seconds: forces, then velocity, then position
    pub fn step(&mut self, dt: f32) -> Result<(), ParticleError> {
        if !(dt > 0.0) {
            return Err(ParticleError::NonPositiveTimeStep(dt));
        }

        // No external forces act on the map; only the accumulator is cleared
        for particle in &mut self.particles {
            particle.reset_forces();
        }
        for particle in &mut self.particles {
            particle.update_velocity(dt);
        }
        for particle in &mut self.particles {
            particle.update_position(dt);
        }
        Ok(())
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The player-controlled particle, if any
    pub fn central_particle(&self) -> Option<&Particle> {
        self.particles.first()
    }

    pub fn central_particle_mut(&mut self) -> Option<&mut Particle> {
        self.particles.first_mut()
    }

    pub fn log_state(&self) {
        for p in &self.particles {
            debug!(
                "{}: position {:?}, velocity {:?}, mass {}",
                p.name, p.position, p.velocity, p.mass
            );
        }
    }
}
