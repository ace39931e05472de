use std::collections::BTreeMap;

use super::win::{evaluate_ron, evaluate_tsumo};
use crate::hand::*;
use crate::model::*;

// 指定座席のプレイヤーが現在選択可能な操作の一覧
// 操作の必要がないプレイヤーに対しては空のVecを返却
pub fn possible_actions(stg: &Stage, seat: Seat) -> Vec<Action> {
    if stg.phase != Phase::Playing {
        return vec![];
    }

    // 華牌抜きは他のすべての操作に優先する
    if let Some(s) = stg.flower_pending_seat() {
        if s != seat {
            return vec![];
        }
        return stg.players[seat]
            .pending_flowers
            .first()
            .map(|f| vec![Action::ExtractFlower { id: f.id }])
            .unwrap_or_default();
    }

    match stg.turn_phase {
        TurnPhase::Draw => {
            if seat == stg.turn {
                vec![Action::Draw]
            } else {
                vec![]
            }
        }
        TurnPhase::Action => {
            if seat == stg.turn {
                calc_turn_actions(stg, seat)
            } else {
                vec![]
            }
        }
        TurnPhase::Discard => {
            if seat == stg.turn {
                vec![]
            } else {
                calc_call_actions(stg, seat)
            }
        }
        TurnPhase::Chankan => match stg.last_tile {
            Some(lt) if lt.seat != seat => {
                let mut acts = vec![];
                if can_ron(stg, seat) {
                    acts.push(Action::Ron);
                }
                acts.push(Action::Skip);
                acts
            }
            _ => vec![],
        },
    }
}

fn calc_turn_actions(stg: &Stage, seat: Seat) -> Vec<Action> {
    let pl = &stg.players[seat];
    let mut acts = vec![];

    // ツモ和了
    if pl.drawn.is_some() {
        if evaluate_tsumo(stg, seat, None).is_some() {
            acts.push(Action::tsumo());
        }
        if pl.concealed().iter().any(|t| t.is_joker) {
            for t in calc_joker_targets(&pl.concealed_table()) {
                if evaluate_tsumo(stg, seat, Some(t)).is_some() {
                    acts.push(Action::Tsumo { joker: Some(t) });
                }
            }
        }
    }

    // 暗槓,加槓
    if !pl.is_riichi && pl.drawn.is_some() && stg.kan_count < MAX_KAN {
        let concealed = pl.concealed();
        let mut done = vec![];
        for t in &concealed {
            if done.contains(&t.tile) {
                continue;
            }
            done.push(t.tile);
            let ids: Vec<TileId> = concealed
                .iter()
                .filter(|x| x.tile == t.tile)
                .map(|x| x.id)
                .collect();
            if ids.len() == TILE {
                acts.push(Action::ankan(ids));
            }
        }
        for m in pl.melds.iter().filter(|m| m.meld_type == MeldType::Pon) {
            for t in concealed.iter().filter(|x| x.tile == m.tile()) {
                acts.push(Action::kakan(t.id));
            }
        }
    }

    // 打牌,リーチ
    let pressure = pressure_waits(stg, seat);
    let candidates: Vec<TileInstance> = if pl.is_riichi {
        pl.drawn.iter().copied().collect()
    } else {
        pl.concealed()
    };
    let can_riichi = pl.is_menzen
        && !pl.is_riichi
        && pl.score >= stg.rule.riichi_cost
        && stg.wall.remaining() >= 1;
    let tenpai_discards: BTreeMap<Tile, Vec<Tile>> = if can_riichi {
        calc_discards_to_tenpai(&pl.concealed_table())
            .into_iter()
            .collect()
    } else {
        BTreeMap::new()
    };
    let discard_tiles = pl.discard_tiles();

    for t in candidates {
        if check_pressure(stg, seat, pressure.as_deref(), t.tile).is_none() {
            continue;
        }
        acts.push(Action::discard(t.id));
        if let Some(waits) = tenpai_discards.get(&t.tile) {
            if waits.iter().any(|w| discard_tiles.contains(w) || *w == t.tile) {
                acts.push(Action::open_riichi(t.id));
            } else {
                acts.push(Action::riichi(t.id));
            }
        }
    }

    acts
}

fn calc_call_actions(stg: &Stage, seat: Seat) -> Vec<Action> {
    let lt = match stg.last_tile {
        Some(lt) if lt.seat != seat && lt.kind == LastTileKind::Discard => lt,
        _ => return vec![],
    };
    let pl = &stg.players[seat];
    let mut acts = vec![];

    if can_ron(stg, seat) {
        acts.push(Action::Ron);
    }

    // 河底の打牌は鳴けない
    if stg.wall.remaining() > 0 && !pl.is_riichi {
        let ids: Vec<TileId> = pl
            .hand
            .iter()
            .filter(|t| t.tile == lt.tile.tile)
            .map(|t| t.id)
            .collect();
        for i in 0..ids.len() {
            for j in i + 1..ids.len() {
                acts.push(Action::pon(vec![ids[i], ids[j]]));
            }
        }
        if ids.len() >= 3 && stg.kan_count < MAX_KAN {
            acts.push(Action::minkan(ids[..3].to_vec()));
        }
    }

    acts.push(Action::Skip);
    acts
}

fn can_ron(stg: &Stage, seat: Seat) -> bool {
    let pl = &stg.players[seat];
    !is_furiten(&pl.hand_table(), &pl.discard_tiles()) && evaluate_ron(stg, seat).is_some()
}

// オープンリーチ者が1人だけの場合,その待ち牌
pub fn pressure_waits(stg: &Stage, seat: Seat) -> Option<Vec<Tile>> {
    let seats = stg.open_riichi_seats();
    if seats.len() != 1 || seats[0] == seat || stg.players[seat].is_riichi {
        return None;
    }
    Some(calc_waiting_tiles(&stg.players[seats[0]].hand_table()))
}

// オープンリーチ者の待ち牌の打牌制限
// 打牌不可の場合はNone, 可能な場合は押し出しかどうかを返却
// 手牌とツモ牌がすべて待ち牌の場合のみ押し出しとして打牌できる
pub fn check_pressure(stg: &Stage, seat: Seat, waits: Option<&[Tile]>, tile: Tile) -> Option<bool> {
    let waits = match waits {
        Some(w) if w.contains(&tile) => w,
        _ => return Some(false),
    };
    let pl = &stg.players[seat];
    if pl.concealed().iter().all(|t| waits.contains(&t.tile)) {
        Some(true)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::super::round::start_round_with_wall;
    use super::super::wall::create_wall_debug;
    use super::*;

    fn new_round(hands: [&[&str]; SEAT], live: &[&str]) -> Stage {
        let stg = Stage::new(["a", "b", "c"], Rule::default());
        let mut stg = start_round_with_wall(&stg, create_wall_debug(0, hands, live)).unwrap();
        // 華牌抜きを省略
        for pl in &mut stg.players {
            let fs = std::mem::take(&mut pl.pending_flowers);
            pl.flowers.extend(fs);
        }
        stg
    }

    #[test]
    fn test_dealer_actions() {
        let h0 = "p1 p2 p3 p4 p5 p6 s7 s8 s9 z1 z1 z1 m9";
        let h0: Vec<&str> = h0.split_whitespace().collect();
        let stg = new_round([&h0, &[], &[]], &["s1"]);
        let acts = possible_actions(&stg, 0);
        assert!(possible_actions(&stg, 1).is_empty());
        // 14枚すべての打牌 + m9またはs1を切ってのリーチ
        let n_discard = acts.iter().filter(|a| matches!(a, Action::Discard { .. })).count();
        assert_eq!(n_discard, 14);
        let riichi: Vec<&Action> = acts.iter().filter(|a| matches!(a, Action::Riichi { .. })).collect();
        assert_eq!(riichi.len(), 2);
        assert!(!acts.iter().any(|a| matches!(a, Action::Tsumo { .. })));
    }

    #[test]
    fn test_tenhou() {
        let h0 = "p1 p2 p3 p4 p5 p6 s7 s8 s9 z1 z1 z1 m9";
        let h0: Vec<&str> = h0.split_whitespace().collect();
        let stg = new_round([&h0, &[], &[]], &["m9"]);
        let acts = possible_actions(&stg, 0);
        assert!(acts.contains(&Action::tsumo()));
    }

    #[test]
    fn test_calls() {
        let h1 = "p1 p1 p1 p2 p3 p4 s7 s8 s9 z1 z2 z3 m9";
        let h1: Vec<&str> = h1.split_whitespace().collect();
        let h2 = "m1 m9 p9 s1 s3 s5 z2 z3 z4 z5 z6 z7 z7";
        let h2: Vec<&str> = h2.split_whitespace().collect();
        let mut stg = new_round([&[], &h1, &h2], &[]);
        // 親の打牌としてp1を場に出す
        let p1 = create_tiles()
            .into_iter()
            .find(|t| t.tile == Tile(TP, 1) && stg.players[1].find_instance(t.id).is_none())
            .unwrap();
        stg.turn_phase = TurnPhase::Discard;
        stg.last_tile = Some(LastTile {
            seat: 0,
            tile: p1,
            kind: LastTileKind::Discard,
            ippatsu: None,
        });
        let acts = possible_actions(&stg, 1);
        assert_eq!(acts.iter().filter(|a| matches!(a, Action::Pon { .. })).count(), 3);
        assert_eq!(acts.iter().filter(|a| matches!(a, Action::Minkan { .. })).count(), 1);
        assert_eq!(acts.last(), Some(&Action::Skip));
        assert_eq!(possible_actions(&stg, 2), vec![Action::Skip]);

        // 河底は鳴けない
        stg.wall.live.clear();
        assert_eq!(possible_actions(&stg, 1), vec![Action::Skip]);
    }
}
