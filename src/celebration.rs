use rand::seq::SliceRandom;
use rand::Rng;

/// Animation frames per celebration, one per UI tick.
pub const CELEBRATION_TICKS: u32 = 40;

const DT: f64 = 0.1;
const BALLOON_SYMBOLS: [char; 4] = ['●', '◉', '○', '◎'];
const CHEERS: [&str; 4] = ["LIGHTNING FAST!", "SUPERSONIC!", "BLAZING!", "UNSTOPPABLE!"];
pub const PALETTE_SIZE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    /// Floats up from the bottom edge, swaying side to side
    Balloon { sway_phase: f64 },
    /// Flies to a fixed spot to spell out the cheer, then stays
    Letter { target_x: f64, target_y: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub kind: ParticleKind,
}

impl Particle {
    fn balloon<R: Rng + ?Sized>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: 0.0,
            vel_y: rng.gen_range(-6.0..-2.5),
            symbol: *BALLOON_SYMBOLS.choose(rng).unwrap_or(&'●'),
            color_index: rng.gen_range(0..PALETTE_SIZE),
            kind: ParticleKind::Balloon {
                sway_phase: rng.gen_range(0.0..std::f64::consts::TAU),
            },
        }
    }

    fn letter(x: f64, y: f64, target_x: f64, target_y: f64, symbol: char, color: usize) -> Self {
        Self {
            x,
            y,
            vel_x: target_x - x,
            vel_y: target_y - y,
            symbol,
            color_index: color,
            kind: ParticleKind::Letter { target_x, target_y },
        }
    }

    pub fn is_letter(&self) -> bool {
        matches!(self.kind, ParticleKind::Letter { .. })
    }

    fn update(&mut self, dt: f64) {
        match &mut self.kind {
            ParticleKind::Balloon { sway_phase } => {
                *sway_phase += dt * 3.0;
                self.vel_x = sway_phase.sin() * 1.5;
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
            }
            ParticleKind::Letter { target_x, target_y } => {
                let distance =
                    ((*target_x - self.x).powi(2) + (*target_y - self.y).powi(2)).sqrt();
                if distance > 1.0 {
                    self.x += self.vel_x * dt;
                    self.y += self.vel_y * dt;
                    self.vel_x *= 0.95;
                    self.vel_y *= 0.95;
                } else {
                    self.x = *target_x;
                    self.y = *target_y;
                    self.vel_x = 0.0;
                    self.vel_y = 0.0;
                }
            }
        }
    }
}

/// Balloons shown over the results when a game is rated lightning fast
#[derive(Debug, Default)]
pub struct CelebrationAnimation {
    pub particles: Vec<Particle>,
    ticks_left: u32,
    width: f64,
    height: f64,
}

impl CelebrationAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.ticks_left > 0
    }

    pub fn start(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.particles.clear();
        self.ticks_left = CELEBRATION_TICKS;
        self.width = f64::from(width);
        self.height = f64::from(height);

        let cheer = CHEERS.choose(&mut rng).unwrap_or(&CHEERS[0]);
        self.spell(cheer, &mut rng);

        let balloons = (width / 3).clamp(6, 30);
        for _ in 0..balloons {
            let x = rng.gen_range(0.0..self.width.max(1.0));
            let y = self.height + rng.gen_range(0.0..6.0);
            self.particles.push(Particle::balloon(x, y, &mut rng));
        }
    }

    fn spell<R: Rng + ?Sized>(&mut self, text: &str, rng: &mut R) {
        let center_x = self.width / 2.0;
        let center_y = self.height / 3.0;
        let spacing = 2.0;
        let left = center_x - (text.chars().count() as f64 - 1.0) * spacing / 2.0;

        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let start_x = center_x + rng.gen_range(-10.0..10.0);
            let start_y = self.height;
            self.particles.push(Particle::letter(
                start_x,
                start_y,
                left + i as f64 * spacing,
                center_y,
                ch,
                rng.gen_range(0..PALETTE_SIZE),
            ));
        }
    }

    /// Advance one frame; balloons that float off the top are dropped.
    pub fn update(&mut self) {
        if !self.is_active() {
            return;
        }

        self.ticks_left -= 1;
        if self.ticks_left == 0 {
            self.particles.clear();
            return;
        }

        let width = self.width;
        self.particles.retain_mut(|particle| {
            particle.update(DT);
            particle.is_letter() || (particle.y > -2.0 && particle.x > -5.0 && particle.x < width + 5.0)
        });
    }

    pub fn stop(&mut self) {
        self.ticks_left = 0;
        self.particles.clear();
    }
}
