use log::{debug, warn};
use rand::SeedableRng;

use super::engine::execute;
use super::possible_actions::possible_actions;
use super::round::{advance_round, start_round};
use super::settlement::calc_settlement;
use crate::actor::Actor;
use crate::listener::Listener;
use crate::model::*;
use crate::util::error::{Error, Res};

// 局面を保持して対局を進行する
// ActorとListenerには確定した局面のみを通知する
#[derive(Debug)]
pub struct StageController {
    stage: Stage,
    rng: rand::rngs::StdRng, // 牌山生成
    actors: [Box<dyn Actor>; SEAT],
    listeners: Vec<Box<dyn Listener>>,
}

impl StageController {
    pub fn new(
        rule: Rule,
        seed: u64,
        actors: [Box<dyn Actor>; SEAT],
        listeners: Vec<Box<dyn Listener>>,
    ) -> Self {
        let names = [
            actors[0].get_config().name.clone(),
            actors[1].get_config().name.clone(),
            actors[2].get_config().name.clone(),
        ];
        let stage = Stage::new([&names[0], &names[1], &names[2]], rule);
        Self {
            stage,
            rng: rand::rngs::StdRng::seed_from_u64(seed),
            actors,
            listeners,
        }
    }

    #[inline]
    pub fn get_stage(&self) -> &Stage {
        &self.stage
    }

    // 対局終了まで進行して精算結果を返却
    pub fn run(&mut self) -> Res<Vec<SettlementEntry>> {
        self.handle_event(&Event::begin());
        while !self.stage.is_game_end() {
            self.play_round()?;
            self.stage = advance_round(&self.stage)?;
        }
        let settlement = calc_settlement(&self.stage);
        self.handle_event(&Event::end(settlement.clone()));
        Ok(settlement)
    }

    // 1局分の進行
    pub fn play_round(&mut self) -> Res {
        self.stage = start_round(&self.stage, &mut self.rng)?;
        for s in 0..SEAT {
            self.actors[s].init(s);
        }
        let stg = &self.stage;
        let event = Event::new(stg.round, stg.dealer, stg.honba, stg.kyotaku);
        self.handle_event(&event);

        while self.stage.phase == Phase::Playing {
            self.step()?;
        }

        let event = match &self.stage.result {
            Some(RoundResult::Win(w)) => {
                let ura_doras = if self.stage.players[w.context.seat].is_riichi {
                    self.stage.wall.ura_indicators()
                } else {
                    vec![]
                };
                Event::win(w.clone(), ura_doras)
            }
            Some(RoundResult::Draw(d)) => Event::draw(d.clone()),
            None => {
                return Err(Error::InvalidPhase {
                    message: "round ended without result".to_string(),
                })
            }
        };
        self.handle_event(&event);
        Ok(())
    }

    fn step(&mut self) -> Res {
        if let Some(seat) = self.stage.flower_pending_seat() {
            return self.query(seat);
        }
        let turn = self.stage.turn;
        match self.stage.turn_phase {
            TurnPhase::Draw | TurnPhase::Action => self.query(turn),
            TurnPhase::Discard | TurnPhase::Chankan => self.resolve_calls(),
        }
    }

    fn query(&mut self, seat: Seat) -> Res {
        let acts = possible_actions(&self.stage, seat);
        if acts.is_empty() {
            return Err(Error::InvalidPhase {
                message: format!("no action for seat {}", seat),
            });
        }
        let act = self.actors[seat].select_action(&self.stage, seat, &acts);
        self.commit(seat, act)
    }

    // 他家の応答は優先度の高いものを採用 (同じ優先度の場合は手番に近い方)
    fn resolve_calls(&mut self) -> Res {
        let turn = self.stage.turn;
        let mut best: Option<(Seat, Action)> = None;
        for k in 1..SEAT {
            let seat = (turn + k) % SEAT;
            let acts = possible_actions(&self.stage, seat);
            if acts.len() <= 1 {
                continue; // 見送りのみ
            }
            let act = self.actors[seat].select_action(&self.stage, seat, &acts);
            if act == Action::Skip {
                continue;
            }
            if !acts.contains(&act) {
                warn!("seat {}: illegal call {} is ignored", seat, act);
                continue;
            }
            if best.as_ref().map_or(true, |(_, b)| act.priority() > b.priority()) {
                best = Some((seat, act));
            }
        }

        match best {
            Some((seat, act)) => self.commit(seat, act),
            None => self.commit((turn + 1) % SEAT, Action::Skip),
        }
    }

    fn commit(&mut self, seat: Seat, act: Action) -> Res {
        let (next, act) = match execute(&self.stage, seat, &act) {
            Ok(s) => (s, act),
            Err(e) => {
                // 不正な選択の場合は見送りまたは最初の合法手で代替
                let acts = possible_actions(&self.stage, seat);
                let alt = if acts.contains(&Action::Skip) {
                    Action::Skip
                } else {
                    acts.first().cloned().ok_or(e)?
                };
                warn!("seat {}: {} is replaced with {}", seat, act, alt);
                (execute(&self.stage, seat, &alt)?, alt)
            }
        };

        let revealed = self.stage.wall.revealed;
        self.stage = next;
        self.handle_event(&Event::action(seat, act));

        let inds = self.stage.wall.dora_indicators();
        for &d in inds.iter().skip(revealed) {
            debug!("new dora indicator: {}", d);
            self.handle_event(&Event::dora(d));
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        // Actorより先にListenerに通知
        for l in &mut self.listeners {
            l.notify_event(&self.stage, event);
        }
        for a in &mut self.actors {
            a.notify_event(&self.stage, event);
        }
    }
}
