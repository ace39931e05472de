use rand::{Rng, SeedableRng};

use super::*;

pub struct RandomCpuBuilder;

impl ActorBuilder for RandomCpuBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "RandomCpu".to_string(),
            args: vec![
                Arg::int("seed", 0),
                Arg::bool("riichi", true),
                Arg::float("honor", 3.0),
                Arg::float("terminal", 2.0),
            ],
        }
    }

    fn create(&self, config: Config) -> Box<dyn Actor> {
        Box::new(RandomCpu::from_config(config))
    }
}

// 和了,鳴きを優先し,打牌は字牌,老頭牌を優先したランダム選択
#[derive(Clone)]
pub struct RandomCpu {
    config: Config,
    rng: rand::rngs::StdRng,
    riichi: bool,
    honor: f64,
    terminal: f64,
}

impl RandomCpu {
    pub fn from_config(config: Config) -> Self {
        let arg = |name| config.get_arg(name);
        let seed = arg("seed").and_then(Variant::as_int).unwrap_or(0);
        let riichi = arg("riichi").and_then(Variant::as_bool).unwrap_or(true);
        let honor = arg("honor").and_then(Variant::as_float).unwrap_or(3.0);
        let terminal = arg("terminal").and_then(Variant::as_float).unwrap_or(2.0);
        Self {
            rng: rand::rngs::StdRng::seed_from_u64(seed as u64),
            riichi,
            honor,
            terminal,
            config,
        }
    }

    fn select_discard(&mut self, stg: &Stage, seat: Seat, acts: &[Action]) -> Option<Action> {
        let pl = &stg.players[seat];
        let mut best: Option<(f64, &Action)> = None;
        for act in acts {
            let id = match act {
                Action::Discard { id } => *id,
                _ => continue,
            };
            let t = match pl.find_instance(id) {
                Some(t) => t.tile,
                None => continue,
            };
            let mut w = self.rng.gen::<f64>() * 10.0;
            if t.is_honor() {
                w += self.honor;
            }
            if t.is_terminal() {
                w += self.terminal;
            }
            if best.map_or(true, |(bw, _)| w > bw) {
                best = Some((w, act));
            }
        }
        best.map(|(_, a)| a.clone())
    }
}

impl Actor for RandomCpu {
    fn select_action(&mut self, stg: &Stage, seat: Seat, acts: &[Action]) -> Action {
        let find = |f: fn(&Action) -> bool| acts.iter().find(|a| f(a)).cloned();

        if let Some(a) = find(|a| matches!(a, Action::Tsumo { .. })) {
            return a;
        }
        if let Some(a) = find(|a| matches!(a, Action::Ron)) {
            return a;
        }
        if let Some(a) = find(|a| matches!(a, Action::ExtractFlower { .. } | Action::Draw)) {
            return a;
        }
        if self.riichi {
            if let Some(a) = find(|a| matches!(a, Action::Riichi { .. })) {
                return a;
            }
        }
        if let Some(a) = find(|a| matches!(a, Action::Pon { .. })) {
            return a;
        }
        if let Some(a) = self.select_discard(stg, seat, acts) {
            return a;
        }
        if acts.contains(&Action::Skip) {
            return Action::Skip;
        }
        acts.first().cloned().unwrap_or(Action::Skip)
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

impl Listener for RandomCpu {}
