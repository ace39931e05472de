use std::sync::mpsc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use rand::prelude::*;

use sanma::actor::{create_actor, Actor, ActorClone};
use sanma::control::StageController;
use sanma::listener::{EventPrinter, Listener};
use sanma::model::*;

#[derive(Debug, Args)]
pub struct EngineArgs {
    /// 乱数のシード値 (0の場合は現在時刻)
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// 対局数 (0の場合は1局を詳細表示)
    #[arg(short, long, default_value_t = 0)]
    games: u32,

    /// 並列実行するスレッド数
    #[arg(short, long, default_value_t = 4)]
    threads: u32,

    /// ルール設定のJSONファイル
    #[arg(short, long)]
    rule: Option<String>,

    /// 操作ごとに局面を表示
    #[arg(short, long)]
    print_stage: bool,

    /// 各座席のActor ("Name(arg0,arg1,...)")
    #[arg(long = "a0", default_value = "RandomCpu(0)")]
    actor0: String,
    #[arg(long = "a1", default_value = "RandomCpu(1)")]
    actor1: String,
    #[arg(long = "a2", default_value = "RandomCpu(2)")]
    actor2: String,
}

// [App]
#[derive(Debug)]
pub struct EngineApp {
    seed: u64,
    rule: Rule,
    n_game: u32,
    n_thread: u32,
    print_stage: bool,
    actors: [Box<dyn Actor>; SEAT],
}

impl EngineApp {
    pub fn new(args: EngineArgs) -> Result<Self> {
        let rule = match &args.rule {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read rule file: {}", path))?;
                Rule::from_json(&json).with_context(|| format!("invalid rule file: {}", path))?
            }
            None => Rule::default(),
        };

        let mut seed = args.seed;
        if seed == 0 {
            seed = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
            info!(
                "Random seed is not specified. Unix timestamp '{}' is used as seed.",
                seed
            );
        }

        let actors = [
            create_actor(&args.actor0)?,
            create_actor(&args.actor1)?,
            create_actor(&args.actor2)?,
        ];

        Ok(Self {
            seed,
            rule,
            n_game: args.games,
            n_thread: args.threads.max(1),
            print_stage: args.print_stage,
            actors,
        })
    }

    pub fn run(self) -> Result<()> {
        println!("seed: {}", self.seed);
        for s in 0..SEAT {
            println!("actor{}: {:?}", s, self.actors[s]);
        }
        println!();

        let start = Instant::now();
        if self.n_game == 0 {
            self.run_single_game()?;
        } else {
            self.run_multiple_game()?;
        }
        println!(
            "total elapsed time: {:8.3}sec",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn run_single_game(self) -> Result<()> {
        let listeners: Vec<Box<dyn Listener>> = vec![Box::new(EventPrinter::new(self.print_stage))];
        let mut ctrl = StageController::new(self.rule, self.seed, self.actors, listeners);
        ctrl.run()?;
        Ok(())
    }

    // 座席をシャッフルして複数の対局を並列に実行し,Actorごとの平均順位と平均pt を表示
    fn run_multiple_game(self) -> Result<()> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(self.seed);
        let (tx, rx) = mpsc::channel();
        let mut n_game = 0;
        let mut n_running = 0;
        let mut n_game_end = 0;
        let mut sum_totals = [0.0; SEAT];
        let mut sum_ranks = [0; SEAT];

        while n_game_end < self.n_game {
            while n_game < self.n_game && n_running < self.n_thread {
                n_game += 1;
                n_running += 1;

                let seed = rng.next_u64();
                let mut shuffle_table = [0, 1, 2];
                shuffle_table.shuffle(&mut rng);
                let actors = [
                    self.actors[shuffle_table[0]].clone_box(),
                    self.actors[shuffle_table[1]].clone_box(),
                    self.actors[shuffle_table[2]].clone_box(),
                ];
                let rule = self.rule.clone();
                let tx2 = tx.clone();
                std::thread::spawn(move || {
                    let start = Instant::now();
                    let mut ctrl = StageController::new(rule, seed, actors, vec![]);
                    let res = ctrl.run();
                    // 受信側が終了している場合は結果を破棄
                    let _ = tx2.send((shuffle_table, seed, res, start.elapsed()));
                });
            }

            let (shuffle, seed, res, elapsed) = rx.recv()?;
            n_running -= 1;
            n_game_end += 1;
            let settlement = res.with_context(|| format!("game failed (seed: {})", seed))?;
            print!("{:5},{:4}ms,{:20}", n_game_end, elapsed.as_millis(), seed);
            for e in &settlement {
                let i = shuffle[e.seat];
                sum_totals[i] += e.total;
                sum_ranks[i] += e.rank + 1;
                print!(", ac{}:{:6}({})", i, e.score, e.rank + 1);
            }
            println!();
        }

        for i in 0..SEAT {
            println!(
                "ac{} avg_rank: {:.2}, avg_total: {:+.2}",
                i,
                sum_ranks[i] as f64 / self.n_game as f64,
                sum_totals[i] / self.n_game as f64,
            );
        }
        Ok(())
    }
}
