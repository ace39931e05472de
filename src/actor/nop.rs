use super::*;

pub struct NopBuilder;

impl ActorBuilder for NopBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "Nop".to_string(),
            args: vec![],
        }
    }

    fn create(&self, config: Config) -> Box<dyn Actor> {
        Box::new(Nop::from_config(config))
    }
}

// 和了,鳴きを一切行わずツモ切りを続ける
#[derive(Clone)]
pub struct Nop {
    config: Config,
}

impl Nop {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }
}

impl Actor for Nop {
    fn select_action(&mut self, stg: &Stage, seat: Seat, acts: &[Action]) -> Action {
        let drawn = stg.players[seat].drawn.map(|d| Action::discard(d.id));
        for a in acts {
            match a {
                Action::Skip | Action::Draw | Action::ExtractFlower { .. } => return a.clone(),
                _ => {}
            }
        }
        match drawn {
            Some(d) if acts.contains(&d) => d,
            _ => acts
                .iter()
                .rev()
                .find(|a| matches!(a, Action::Discard { .. }))
                .or_else(|| acts.first())
                .cloned()
                .unwrap_or(Action::Skip),
        }
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

impl Listener for Nop {}
