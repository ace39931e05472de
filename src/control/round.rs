use log::{debug, info};
use rand::Rng;

use super::wall::create_wall;
use crate::hand::is_tenpai;
use crate::model::*;
use crate::util::error::{Error, Res};

// 配牌で子が受け取る枚数 (親はさらに1枚をツモ牌として受け取る)
const HAND_SIZE: usize = 13;

// 新しい牌山で局を開始する
pub fn start_round<R: Rng + ?Sized>(stg: &Stage, rng: &mut R) -> Res<Stage> {
    start_round_with_wall(stg, create_wall(rng))
}

// 指定の牌山で局を開始する
// 子は親の次の座席から1枚ずつ交互に13枚,その後に親が14枚を受け取り14枚目がツモ牌となる
pub fn start_round_with_wall(stg: &Stage, wall: Wall) -> Res<Stage> {
    if !matches!(stg.phase, Phase::Waiting | Phase::Dealing) {
        return Err(Error::InvalidPhase {
            message: format!("cannot start a round in {:?}", stg.phase),
        });
    }

    let mut s = stg.clone();
    s.phase = Phase::Dealing;
    s.wall = wall;
    s.turn = s.dealer;
    s.turn_phase = TurnPhase::Action;
    s.last_tile = None;
    s.kan_count = 0;
    s.result = None;
    for seat in 0..SEAT {
        let w = s.get_seat_wind(seat);
        s.players[seat].reset(w);
    }

    for _ in 0..HAND_SIZE {
        for k in 1..SEAT {
            let seat = (s.dealer + k) % SEAT;
            deal_one(&mut s, seat, false)?;
        }
    }
    for _ in 0..HAND_SIZE {
        let seat = s.dealer;
        deal_one(&mut s, seat, false)?;
    }
    let seat = s.dealer;
    deal_one(&mut s, seat, true)?;

    s.phase = Phase::Playing;
    s.remaining_draws = s.wall.remaining();
    s.step += 1;
    debug!(
        "start {} dealer: {}, honba: {}, kyotaku: {}",
        s.round, s.dealer, s.honba, s.kyotaku
    );
    Ok(s)
}

fn deal_one(s: &mut Stage, seat: Seat, is_drawn: bool) -> Res {
    let t = s.wall.draw().ok_or_else(|| Error::InvalidPhase {
        message: "wall is too short to deal".to_string(),
    })?;
    let pl = &mut s.players[seat];
    if t.is_flower() {
        pl.pending_flowers.push(t);
    } else if is_drawn {
        pl.drawn = Some(t);
    } else {
        pl.add_to_hand(t);
    }
    Ok(())
}

// 荒牌(牌山または嶺上牌の枯渇)による局の終了
// 流し満貫の達成者がいる場合はそちらを優先し,いない場合はノーテン罰符を精算する
pub fn exhaustive_draw(s: &mut Stage) {
    let mut tenpai = [false; SEAT];
    for seat in 0..SEAT {
        tenpai[seat] = is_tenpai(&s.players[seat].concealed_table());
    }
    let nagashi: Vec<Seat> = (0..SEAT)
        .filter(|&seat| s.players[seat].is_nagashi && !s.players[seat].discards.is_empty())
        .collect();

    let mut deltas = [0; SEAT];
    let draw_type = if !nagashi.is_empty() {
        // 役満扱い 他家が半分ずつ支払う (積み棒なし)
        for &w in &nagashi {
            let score = if s.is_dealer(w) { 48000 } else { 32000 };
            for seat in 0..SEAT {
                if seat != w {
                    deltas[seat] -= score / 2;
                    deltas[w] += score / 2;
                }
            }
        }
        DrawType::Nagashi
    } else {
        let n_tenpai = tenpai.iter().filter(|&&t| t).count();
        if n_tenpai != 0 && n_tenpai != SEAT {
            let penalty = s.rule.noten_penalty;
            let recv = penalty / n_tenpai as Point;
            let pay = penalty / (SEAT - n_tenpai) as Point;
            for seat in 0..SEAT {
                deltas[seat] = if tenpai[seat] { recv } else { -pay };
            }
        }
        DrawType::Exhaustive
    };

    for seat in 0..SEAT {
        s.players[seat].score += deltas[seat];
    }
    info!(
        "{} {} tenpai: {:?}, deltas: {:?}",
        s.round, draw_type, tenpai, deltas
    );
    s.result = Some(RoundResult::Draw(DrawResult {
        draw_type,
        tenpai,
        nagashi,
        deltas,
    }));
    s.last_tile = None;
    s.phase = Phase::RoundEnd;
}

// 飛び (持ち点0以下) の有無
pub fn is_bust(stg: &Stage) -> bool {
    stg.rule.bust && stg.players.iter().any(|pl| pl.score <= 0)
}

// 局の結果から次局の場,親,本場を決定する
// 南3局が親の連荘なしで終了した場合,または飛びが発生した場合は対局終了
pub fn advance_round(stg: &Stage) -> Res<Stage> {
    let result = match (&stg.phase, &stg.result) {
        (Phase::RoundEnd, Some(r)) => r,
        _ => {
            return Err(Error::InvalidPhase {
                message: format!("round has not ended: {:?}", stg.phase),
            })
        }
    };

    let mut s = stg.clone();
    s.step += 1;
    if is_bust(stg) {
        info!("bust");
        s.phase = Phase::GameEnd;
        return Ok(s);
    }

    if result.is_dealer_repeat(stg.dealer) {
        s.honba += 1;
    } else {
        s.honba = 0;
        s.dealer = (s.dealer + 1) % SEAT;
        if s.dealer == 0 {
            if s.round.wind == WE {
                s.round = Round { wind: WS, number: 1 };
            } else {
                s.phase = Phase::GameEnd;
                return Ok(s);
            }
        } else {
            s.round.number = s.round.number % SEAT + 1;
        }
    }

    for seat in 0..SEAT {
        s.players[seat].wind = s.get_seat_wind(seat);
    }
    s.phase = Phase::Dealing;
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::super::wall::create_wall_from_seed;
    use super::*;

    fn new_stage() -> Stage {
        Stage::new(["a", "b", "c"], Rule::default())
    }

    #[test]
    fn test_deal() {
        let stg = new_stage();
        let s = start_round_with_wall(&stg, create_wall_from_seed(7)).unwrap();
        assert_eq!(s.phase, Phase::Playing);
        assert_eq!(s.turn, 0);
        for seat in 0..SEAT {
            let pl = &s.players[seat];
            let n = pl.hand.len() + pl.drawn.iter().count() + pl.pending_flowers.len();
            assert_eq!(n, if seat == 0 { 14 } else { 13 });
            assert!(pl.hand.iter().all(|t| !t.is_flower()));
            assert!(pl.hand.windows(2).all(|w| w[0] <= w[1]));
        }
        assert_eq!(s.remaining_draws, TILE_COUNT - DEAD_WALL - 13 * 3 - 1);

        // 開始済みの局は再開始できない
        assert!(start_round_with_wall(&s, create_wall_from_seed(7)).is_err());
    }

    #[test]
    fn test_noten_bappu() {
        let stg = new_stage();
        let mut s = start_round_with_wall(&stg, create_wall_from_seed(0)).unwrap();
        let tenpai: Vec<Tile> = "p1 p2 p3 p4 p5 p6 s7 s8 s9 z1 z1 z1 m9"
            .split_whitespace()
            .map(|x| x.parse().unwrap())
            .collect();
        let noten: Vec<Tile> = "p1 p4 p7 s1 s4 s7 z1 z2 z3 z4 z5 z6 m1"
            .split_whitespace()
            .map(|x| x.parse().unwrap())
            .collect();
        let all = create_tiles();
        let to_instances = |v: &[Tile]| -> Vec<TileInstance> {
            v.iter()
                .map(|t| *all.iter().find(|x| x.tile == *t).unwrap())
                .collect()
        };
        for seat in 0..SEAT {
            let pl = &mut s.players[seat];
            pl.drawn = None;
            pl.is_nagashi = false;
            pl.hand = to_instances(if seat == 2 { &noten } else { &tenpai });
        }

        exhaustive_draw(&mut s);
        assert_eq!(s.phase, Phase::RoundEnd);
        assert_eq!(s.result.as_ref().unwrap().deltas(), [1000, 1000, -2000]);
        assert_eq!(s.get_scores(), [51000, 51000, 48000]);

        // 親聴牌で連荘
        let next = advance_round(&s).unwrap();
        assert_eq!(next.dealer, 0);
        assert_eq!(next.honba, 1);
        assert_eq!(next.phase, Phase::Dealing);
    }

    #[test]
    fn test_advance_round() {
        let mut s = new_stage();
        s.phase = Phase::RoundEnd;
        s.result = Some(RoundResult::Draw(DrawResult {
            draw_type: DrawType::Exhaustive,
            tenpai: [false; SEAT],
            nagashi: vec![],
            deltas: [0; SEAT],
        }));

        let mut rounds = vec![];
        while s.phase != Phase::GameEnd {
            rounds.push(s.round.to_string());
            s = advance_round(&s).unwrap();
            s.phase = Phase::RoundEnd;
            if s.dealer == 0 && s.round.wind == WS && s.round.number == 1 && rounds.len() > 3 {
                break;
            }
        }
        assert_eq!(rounds, vec!["東1局", "東2局", "東3局", "南1局"]);

        s.round = Round { wind: WS, number: 3 };
        s.dealer = 2;
        s.phase = Phase::RoundEnd;
        assert_eq!(advance_round(&s).unwrap().phase, Phase::GameEnd);

        s.round = Round { wind: WE, number: 1 };
        s.dealer = 0;
        s.players[1].score = 0;
        assert_eq!(advance_round(&s).unwrap().phase, Phase::GameEnd);
    }
}
