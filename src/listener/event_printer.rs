use super::Listener;
use crate::model::*;
use crate::util::misc::vec_to_string;

// [EventPrinter]
// verbose: 打牌などの操作ごとに局面を表示
#[derive(Debug, Default)]
pub struct EventPrinter {
    verbose: bool,
}

impl EventPrinter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn print_score_change(&self, stg: &Stage, deltas: &[Point; SEAT]) {
        for s in 0..SEAT {
            let delta = deltas[s];
            let new = stg.players[s].score;
            let old = new - delta;
            println!("player {}: {} -> {} ({:+})", s, old, new, delta);
        }
        println!();
    }
}

impl Listener for EventPrinter {
    fn notify_event(&mut self, stg: &Stage, event: &Event) {
        use Event::*;
        match event {
            Begin(_) => {
                println!("Begin");
            }
            New(e) => {
                println!("New {} 親: {}, {}本場, 供託: {}", e.round, e.dealer, e.honba, e.kyotaku);
                if self.verbose {
                    println!("{}", stg);
                }
            }
            Action(e) => {
                if self.verbose {
                    println!("(step:{}) seat {}: {}", stg.step, e.seat, e.action);
                    println!("{}", stg.players[e.seat]);
                }
            }
            Dora(e) => {
                println!("Dora {}", e.tile);
            }
            Win(e) => {
                let ctx = &e.result.context;
                match ctx.from {
                    Some(from) => println!("Ron seat {} <- {}", ctx.seat, from),
                    None => println!("Tsumo seat {}", ctx.seat),
                }
                println!("hand: {} (winning tile: {})", vec_to_string(&ctx.hand), ctx.winning_tile);
                if !e.ura_doras.is_empty() {
                    println!("ura_dora: {}", vec_to_string(&e.ura_doras));
                }
                for (name, fan) in &ctx.yakus {
                    println!("  {} {}", name, fan);
                }
                println!("{} {}点 祝儀: {}", ctx.title, ctx.score, ctx.chips);
                if let Some(pao) = ctx.pao {
                    println!("包: seat {}", pao);
                }
                self.print_score_change(stg, &e.result.deltas);
            }
            Draw(e) => {
                println!("{} tenpai: {:?}", e.result.draw_type, e.result.tenpai);
                self.print_score_change(stg, &e.result.deltas);
            }
            End(e) => {
                println!("End");
                for s in &e.settlement {
                    println!(
                        "{}位 seat {} score: {} chips: {} total: {:+.1}",
                        s.rank + 1,
                        s.seat,
                        s.score,
                        s.chips,
                        s.total
                    );
                }
            }
        }
    }
}
