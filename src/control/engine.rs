use log::{debug, info, warn};

use super::possible_actions::*;
use super::round::exhaustive_draw;
use super::shuugi::{calc_chip_deltas, calc_chips};
use super::win::*;
use crate::hand::is_complete;
use crate::model::*;
use crate::util::error::{Error, Res};

// [Engine]
// 操作を適用した新しい局面を返却する. 入力の局面は変更しない
// 合法手に含まれない操作はErrを返却し,呼び出し側は直前の局面を保持する
// 他家の応答(ロン,ポン,見送り)の優先度は判定しない. 複数の応答の調停は
// 呼び出し側で行うこと (StageController::resolve_calls)
pub fn execute(stg: &Stage, seat: Seat, act: &Action) -> Res<Stage> {
    if stg.phase != Phase::Playing {
        return Err(Error::InvalidPhase {
            message: format!("{} is not allowed in {:?}", act, stg.phase),
        });
    }

    let acts = possible_actions(stg, seat);
    if !acts.contains(act) {
        warn!("rejected seat {}: {} (legal: {:?})", seat, act, acts);
        if is_yakuless_win(stg, seat, act) {
            return Err(Error::NoYaku);
        }
        return Err(Error::illegal(seat, act.to_string()));
    }

    let mut s = stg.clone();
    match act {
        Action::Draw => do_draw(&mut s, seat),
        Action::ExtractFlower { id } => do_extract_flower(&mut s, seat, *id)?,
        Action::Discard { id } => do_discard(&mut s, seat, *id, None)?,
        Action::Riichi { id } => do_discard(&mut s, seat, *id, Some(false))?,
        Action::OpenRiichi { id } => do_discard(&mut s, seat, *id, Some(true))?,
        Action::Ankan { ids } => do_ankan(&mut s, seat, ids)?,
        Action::Kakan { id } => do_kakan(&mut s, seat, *id)?,
        Action::Pon { ids } => do_call(&mut s, seat, ids, MeldType::Pon)?,
        Action::Minkan { ids } => do_call(&mut s, seat, ids, MeldType::Minkan)?,
        Action::Tsumo { joker } => {
            let ctx = evaluate_tsumo(&s, seat, *joker).ok_or(Error::NoYaku)?;
            finish_win(&mut s, ctx);
        }
        Action::Ron => {
            let ctx = evaluate_ron(&s, seat).ok_or(Error::NoYaku)?;
            finish_win(&mut s, ctx);
        }
        Action::Skip => do_skip(&mut s),
    }

    s.remaining_draws = s.wall.remaining();
    s.step += 1;
    debug!("seat {}: {} -> {:?}/{:?}", seat, act, s.phase, s.turn_phase);
    Ok(s)
}

// 和了形だが役がない場合
fn is_yakuless_win(stg: &Stage, seat: Seat, act: &Action) -> bool {
    let pl = &stg.players[seat];
    match act {
        Action::Tsumo { .. } => {
            stg.turn == seat && pl.drawn.is_some() && is_complete(&pl.concealed_table())
        }
        Action::Ron => match stg.last_tile {
            Some(lt) if lt.seat != seat => {
                let mut tt = pl.hand_table();
                tt[lt.tile.tile.0][lt.tile.tile.1] += 1;
                is_complete(&tt)
            }
            _ => false,
        },
        _ => false,
    }
}

fn missing(seat: Seat, id: TileId) -> Error {
    Error::illegal(seat, format!("tile {} is not in hand", id))
}

fn do_draw(s: &mut Stage, seat: Seat) {
    s.last_tile = None;
    match s.wall.draw() {
        None => exhaustive_draw(s),
        Some(t) => {
            let pl = &mut s.players[seat];
            pl.is_rinshan = false;
            if t.is_flower() {
                pl.pending_flowers.push(t);
            } else {
                pl.drawn = Some(t);
            }
            s.turn_phase = TurnPhase::Action;
        }
    }
}

fn do_extract_flower(s: &mut Stage, seat: Seat, id: TileId) -> Res {
    let pl = &mut s.players[seat];
    let i = pl
        .pending_flowers
        .iter()
        .position(|f| f.id == id)
        .ok_or_else(|| missing(seat, id))?;
    let f = pl.pending_flowers.remove(i);
    pl.flowers.push(f);

    let r = match s.wall.extract_flower() {
        Some(r) => r,
        None => {
            exhaustive_draw(s);
            return Ok(());
        }
    };
    let is_action = s.turn == seat && s.turn_phase == TurnPhase::Action;
    let pl = &mut s.players[seat];
    if r.is_flower() {
        pl.pending_flowers.push(r);
    } else if is_action && pl.drawn.is_none() {
        pl.drawn = Some(r);
    } else {
        pl.add_to_hand(r);
    }
    Ok(())
}

// riichi: None(通常の打牌), Some(is_open)
fn do_discard(s: &mut Stage, seat: Seat, id: TileId, riichi: Option<bool>) -> Res {
    let tile = s.players[seat]
        .find_instance(id)
        .ok_or_else(|| missing(seat, id))?;
    let waits = pressure_waits(s, seat);
    let is_oshidashi = check_pressure(s, seat, waits.as_deref(), tile.tile).unwrap_or(false);
    let riichi_cost = s.rule.riichi_cost;

    let pl = &mut s.players[seat];
    let is_tsumogiri = pl.drawn.map(|d| d.id) == Some(id);
    pl.take_instance(id).ok_or_else(|| missing(seat, id))?;
    pl.merge_drawn();

    match riichi {
        Some(is_open) => {
            pl.score -= riichi_cost;
            pl.is_riichi = true;
            pl.is_open_riichi = is_open;
            pl.is_double_riichi = pl.is_first_turn;
            pl.is_ippatsu = true;
            s.kyotaku += 1;
            debug!("seat {} riichi (open: {})", seat, is_open);
        }
        None => pl.is_ippatsu = false,
    }
    if !tile.tile.is_end() {
        pl.is_nagashi = false;
    }
    pl.is_first_turn = false;
    pl.is_rinshan = false;
    pl.discards.push(Discard {
        tile,
        is_riichi: riichi.is_some(),
        is_tsumogiri,
        called_by: None,
        is_oshidashi,
    });

    // 他家の一発を消す
    let mut ippatsu = None;
    for other in 0..SEAT {
        if other != seat && s.players[other].is_ippatsu {
            s.players[other].is_ippatsu = false;
            ippatsu = Some(other);
        }
    }

    s.last_tile = Some(LastTile {
        seat,
        tile,
        kind: LastTileKind::Discard,
        ippatsu,
    });
    s.turn_phase = TurnPhase::Discard;
    Ok(())
}

// 鳴き,槓による一発,第一打牌前フラグの消失
fn break_flags(s: &mut Stage) {
    for pl in &mut s.players {
        pl.is_ippatsu = false;
        pl.is_first_turn = false;
    }
}

// 槓ドラをめくって嶺上牌をツモる
fn draw_replacement(s: &mut Stage, seat: Seat) {
    if let Some(d) = s.wall.reveal_kan_dora() {
        debug!("kan dora indicator: {}", d);
    }
    s.kan_count += 1;
    match s.wall.draw_replacement() {
        None => exhaustive_draw(s),
        Some(t) => {
            let pl = &mut s.players[seat];
            pl.is_rinshan = true;
            if t.is_flower() {
                pl.pending_flowers.push(t);
            } else {
                pl.drawn = Some(t);
            }
        }
    }
}

fn do_call(s: &mut Stage, seat: Seat, ids: &[TileId], meld_type: MeldType) -> Res {
    let lt = s
        .last_tile
        .ok_or_else(|| Error::illegal(seat, "no tile to call"))?;

    let pl = &mut s.players[seat];
    let mut tiles = vec![];
    for &id in ids {
        tiles.push(pl.take_instance(id).ok_or_else(|| missing(seat, id))?);
    }
    tiles.push(lt.tile);
    tiles.sort();
    pl.melds.push(Meld {
        meld_type,
        tiles,
        from: Some(lt.seat),
        called: Some(lt.tile.id),
    });
    pl.is_menzen = false;
    pl.is_nagashi = false;

    let discarder = &mut s.players[lt.seat];
    discarder.is_nagashi = false;
    if let Some(d) = discarder.discards.last_mut() {
        d.called_by = Some(seat);
    }

    break_flags(s);
    s.last_tile = None;
    s.turn = seat;
    s.turn_phase = TurnPhase::Action;
    if meld_type == MeldType::Minkan {
        draw_replacement(s, seat);
    }
    Ok(())
}

fn do_ankan(s: &mut Stage, seat: Seat, ids: &[TileId]) -> Res {
    let pl = &mut s.players[seat];
    let mut tiles = vec![];
    for &id in ids {
        tiles.push(pl.take_instance(id).ok_or_else(|| missing(seat, id))?);
    }
    tiles.sort();
    pl.merge_drawn();
    pl.melds.push(Meld {
        meld_type: MeldType::Ankan,
        tiles,
        from: None,
        called: None,
    });

    break_flags(s);
    draw_replacement(s, seat);
    Ok(())
}

// 加槓は槍槓の応答を待ってから成立する (do_skipで嶺上牌をツモる)
fn do_kakan(s: &mut Stage, seat: Seat, id: TileId) -> Res {
    let pl = &mut s.players[seat];
    let t = pl.take_instance(id).ok_or_else(|| missing(seat, id))?;
    pl.merge_drawn();
    let m = pl
        .melds
        .iter_mut()
        .find(|m| m.meld_type == MeldType::Pon && m.tile() == t.tile)
        .ok_or_else(|| Error::illegal(seat, format!("no pon for {}", t)))?;
    m.meld_type = MeldType::Kakan;
    m.tiles.push(t);
    m.tiles.sort();

    s.last_tile = Some(LastTile {
        seat,
        tile: t,
        kind: LastTileKind::Kakan,
        ippatsu: None,
    });
    s.turn_phase = TurnPhase::Chankan;
    Ok(())
}

fn do_skip(s: &mut Stage) {
    match s.turn_phase {
        TurnPhase::Chankan => {
            s.last_tile = None;
            s.turn_phase = TurnPhase::Action;
            break_flags(s);
            let turn = s.turn;
            draw_replacement(s, turn);
        }
        _ => {
            s.last_tile = None;
            s.turn = (s.turn + 1) % SEAT;
            s.turn_phase = TurnPhase::Draw;
        }
    }
}

fn finish_win(s: &mut Stage, mut ctx: WinContext) {
    let deltas = calc_win_deltas(s, &ctx);
    let mut scores = s.get_scores();
    for seat in 0..SEAT {
        scores[seat] += deltas[seat];
    }
    let chips = calc_chips(s, &ctx);
    let chip_deltas = calc_chip_deltas(s, &ctx, chips, &scores);
    ctx.chips = chips;

    for seat in 0..SEAT {
        s.players[seat].score = scores[seat];
        s.players[seat].chips += chip_deltas[seat];
    }
    s.kyotaku = 0;
    info!(
        "{} seat {} win from {:?}: {} {:?} {} pao: {:?}, deltas: {:?}, chips: {:?}",
        s.round, ctx.seat, ctx.from, ctx.title, ctx.yakus, ctx.score, ctx.pao, deltas, chip_deltas
    );
    s.result = Some(RoundResult::Win(WinResult {
        context: ctx,
        deltas,
        chip_deltas,
    }));
    s.phase = Phase::RoundEnd;
}

#[cfg(test)]
mod tests {
    use super::super::round::{advance_round, start_round_with_wall};
    use super::super::wall::{create_wall_debug, create_wall_from_seed};
    use super::*;

    fn inst(sym: &str, c: usize) -> TileInstance {
        let t: Tile = sym.parse().unwrap();
        let i = LEGAL_TILES.iter().position(|&x| x == t).unwrap();
        create_tiles()[i * TILE + c]
    }

    // 同じ牌は後ろのコピーから順に割り当てる
    fn insts(exp: &str) -> Vec<TileInstance> {
        let mut used: Vec<&str> = vec![];
        exp.split_whitespace()
            .map(|s| {
                let n = used.iter().filter(|&&u| u == s).count();
                used.push(s);
                inst(s, TILE - 1 - n)
            })
            .collect()
    }

    fn pon(sym: &str, from: Seat) -> Meld {
        let tiles = vec![inst(sym, 1), inst(sym, 2), inst(sym, 3)];
        Meld {
            meld_type: MeldType::Pon,
            called: Some(tiles[2].id),
            tiles,
            from: Some(from),
        }
    }

    // 華牌と第一打牌前フラグを取り除いた局面
    fn new_round() -> Stage {
        let stg = Stage::new(["a", "b", "c"], Rule::default());
        let mut s = start_round_with_wall(&stg, create_wall_from_seed(5)).unwrap();
        for pl in &mut s.players {
            pl.pending_flowers.clear();
            pl.is_first_turn = false;
            pl.drawn = None;
        }
        s
    }

    // ドラ,裏ドラ表示牌を指定の牌に入れ替える (keep: 入れ替えないツモ山先頭の枚数)
    fn pin_indicators(w: &mut Wall, t: Tile, keep: usize) {
        let n_live = w.live.len();
        let n_dead = w.dead.len();
        let mut all: Vec<TileInstance> = w.instances().copied().collect();
        for k in 0..2 {
            if all[n_live + k].tile == t {
                continue;
            }
            let j = (keep..all.len())
                .filter(|&j| j != n_live && j != n_live + 1)
                .find(|&j| all[j].tile == t)
                .unwrap();
            all.swap(n_live + k, j);
        }
        let mut rest = all.split_off(n_live);
        let replacements = rest.split_off(n_dead);
        w.live = all.into();
        w.dead = rest;
        w.replacements = replacements.into();
    }

    fn act(s: &Stage, seat: Seat, a: Action) -> Stage {
        execute(s, seat, &a).unwrap()
    }

    fn discard_drawn(s: &Stage, seat: Seat) -> Stage {
        let id = s.players[seat].drawn.unwrap().id;
        act(s, seat, Action::discard(id))
    }

    fn skip(s: &Stage) -> Stage {
        act(s, (s.turn + 1) % SEAT, Action::Skip)
    }

    // ツモって切り,他家は見送る
    fn pass_turn(s: &Stage, seat: Seat) -> Stage {
        let s = act(s, seat, Action::Draw);
        let s = discard_drawn(&s, seat);
        skip(&s)
    }

    #[test]
    fn test_karasu() {
        let hands: [&[&str]; SEAT] = [
            &["p2", "p3", "p6", "p7", "p8", "s2", "s3", "s4", "s6", "s7", "s8", "z1", "z1"],
            &["m1", "m1", "m1", "m9", "m9", "m9", "p9", "p9", "p9", "s9", "s9", "s9", "z5"],
            &["s1", "s1", "s1", "s5", "s5", "s5", "p5", "p5", "p5", "z5", "z5", "z5", "m1"],
        ];
        let live = ["z7", "z3", "z3", "z7", "z4", "z4", "z7", "z3", "z4", "p4"];
        let mut wall = create_wall_debug(11, hands, &live);
        // 表示牌z6 -> ドラz7 (手牌に含まれない)
        pin_indicators(&mut wall, Tile(TZ, DG), 13 * SEAT + live.len());
        let stg = Stage::new(["a", "b", "c"], Rule::default());
        let s = start_round_with_wall(&stg, wall).unwrap();

        let s = discard_drawn(&s, 0);
        let s = skip(&s);
        let s = pass_turn(&s, 1);
        let s = pass_turn(&s, 2);

        // 2巡目にリーチ
        let s = act(&s, 0, Action::Draw);
        let id = s.players[0].drawn.unwrap().id;
        assert!(possible_actions(&s, 0).contains(&Action::riichi(id)));
        let s = act(&s, 0, Action::riichi(id));
        assert_eq!(s.kyotaku, 1);
        let s = skip(&s);
        let s = pass_turn(&s, 1);
        let s = pass_turn(&s, 2);

        // ツモ切りで一巡させる
        let s = pass_turn(&s, 0);
        assert!(!s.players[0].is_ippatsu);
        let s = pass_turn(&s, 1);
        let s = pass_turn(&s, 2);

        let s = act(&s, 0, Action::Draw);
        assert_eq!(s.players[0].drawn.unwrap().tile, Tile(TP, 4));
        let s = act(&s, 0, Action::tsumo());
        assert_eq!(s.phase, Phase::RoundEnd);
        let w = match &s.result {
            Some(RoundResult::Win(w)) => w.clone(),
            r => panic!("unexpected result: {:?}", r),
        };
        assert_eq!(w.context.yakus, vec![("カラス".to_string(), 13)]);
        assert_eq!(w.context.score, 48000);
        assert_eq!(w.deltas, [49000, -24000, -24000]);
        assert_eq!(w.chip_deltas, [10, -5, -5]);
        assert_eq!(s.kyotaku, 0);
        assert_eq!(s.get_scores(), [98000, 26000, 26000]);
    }

    // 親がz3を切ればリーチできる局面 (待ち: p1,p4)
    fn riichi_stage() -> Stage {
        let mut s = new_round();
        s.players[0].hand = insts("p2 p3 p6 p7 p8 s2 s3 s4 s6 s7 s8 z1 z1");
        s.players[0].drawn = Some(inst("z3", 0));
        s.players[1].hand = insts("m1 m1 m1 m9 m9 m9 p9 p9 p9 s9 s9 s9 z5");
        s.players[2].hand = insts("s1 s1 s1 s5 s5 s5 p5 p5 p5 z6 z6 z6 z2");
        s.turn = 0;
        s.turn_phase = TurnPhase::Action;
        s
    }

    fn declare_riichi(s: &Stage) -> Stage {
        let act = Action::riichi(inst("z3", 0).id);
        assert!(possible_actions(s, 0).contains(&act));
        let s = execute(s, 0, &act).unwrap();
        assert!(s.players[0].is_ippatsu);
        s
    }

    #[test]
    fn test_ippatsu_cleared_by_discard() {
        let mut s = riichi_stage();
        s.wall.live.push_front(inst("z7", 3));
        let s = declare_riichi(&s);
        let s = skip(&s);
        assert!(s.players[0].is_ippatsu);

        let s = act(&s, 1, Action::Draw);
        let s = discard_drawn(&s, 1);
        assert!(!s.players[0].is_ippatsu);
        // 一発を消した打牌へのロンは一発
        assert!(s.is_ippatsu(0));

        let s = skip(&s);
        assert!(!s.is_ippatsu(0));
    }

    #[test]
    fn test_ippatsu_cleared_by_call() {
        let mut s = riichi_stage();
        s.players[1].hand = insts("m1 m1 m1 m9 m9 m9 p9 p9 p9 s9 s9 z3 z3");
        let s = declare_riichi(&s);
        let pon = possible_actions(&s, 1)
            .into_iter()
            .find(|a| matches!(a, Action::Pon { .. }))
            .unwrap();
        let s = act(&s, 1, pon);
        assert!(!s.players[0].is_ippatsu);
        assert!(!s.is_ippatsu(0));
    }

    #[test]
    fn test_ippatsu_ron() {
        let mut s = riichi_stage();
        s.wall.live.push_front(inst("p4", 3));
        let s = declare_riichi(&s);
        let s = skip(&s);
        let s = act(&s, 1, Action::Draw);
        let s = discard_drawn(&s, 1);
        assert!(possible_actions(&s, 0).contains(&Action::Ron));

        let s = act(&s, 0, Action::Ron);
        let w = match &s.result {
            Some(RoundResult::Win(w)) => w.clone(),
            r => panic!("unexpected result: {:?}", r),
        };
        assert_eq!(w.context.from, Some(1));
        assert!(w.context.yakus.contains(&("立直".to_string(), 1)));
        assert!(w.context.yakus.contains(&("一発".to_string(), 1)));
    }

    #[test]
    fn test_daisangen_pao_tsumo() {
        let mut s = new_round();
        s.turn = 1;
        s.turn_phase = TurnPhase::Action;
        let pl = &mut s.players[1];
        pl.hand = insts("p2 p3 p4 m9");
        pl.drawn = Some(inst("m9", 2));
        pl.melds = vec![pon("z5", 0), pon("z6", 2), pon("z7", 2)];
        pl.is_menzen = false;

        let s = act(&s, 1, Action::tsumo());
        let w = match &s.result {
            Some(RoundResult::Win(w)) => w.clone(),
            r => panic!("unexpected result: {:?}", r),
        };
        assert_eq!(w.context.pao, Some(2));
        assert!(w.context.yakus.contains(&("大三元".to_string(), 13)));
        assert_eq!(w.deltas, [0, 32000, -32000]);
        // 包は祝儀の支払いに影響しない
        assert_eq!(w.chip_deltas, [-5, 10, -5]);
    }

    #[test]
    fn test_noten_bappu_two_tenpai() {
        let mut s = new_round();
        s.players[0].hand = insts("p2 p3 p6 p7 p8 s2 s3 s4 s6 s7 s8 z1 z1");
        s.players[1].hand = insts("m1 m1 m1 m9 m9 m9 p9 p9 p9 s9 s9 s9 z5");
        s.players[2].hand = insts("z1 z2 z3 z4 z5 z6 z7 m1 p1 p5 s1 s5 p9");
        s.turn = 2;
        s.turn_phase = TurnPhase::Draw;
        s.wall.live.clear();

        let s = act(&s, 2, Action::Draw);
        assert_eq!(s.phase, Phase::RoundEnd);
        let d = match &s.result {
            Some(RoundResult::Draw(d)) => d.clone(),
            r => panic!("unexpected result: {:?}", r),
        };
        assert_eq!(d.draw_type, DrawType::Exhaustive);
        assert_eq!(d.tenpai, [true, true, false]);
        assert_eq!(d.deltas, [1000, 1000, -2000]);

        // 親聴牌で連荘
        let next = advance_round(&s).unwrap();
        assert_eq!(next.dealer, 0);
        assert_eq!(next.honba, 1);
    }

    fn open_riichi_stage() -> Stage {
        let mut s = new_round();
        let pl = &mut s.players[0];
        pl.hand = insts("p2 p3 p6 p7 p8 s2 s3 s4 s6 s7 s8 z1 z1");
        pl.is_riichi = true;
        pl.is_open_riichi = true;
        pl.is_menzen = true;
        s.turn = 1;
        s.turn_phase = TurnPhase::Action;
        s
    }

    #[test]
    fn test_open_riichi_pressure() {
        // 待ち牌(p1,p4)以外を持っている場合は待ち牌を切れない
        let mut s = open_riichi_stage();
        let p4 = inst("p4", 3);
        let pl = &mut s.players[1];
        pl.hand = insts("m1 m1 m1 m9 m9 m9 s9 s9 s9");
        pl.hand.extend(insts("z5 z5 z5"));
        pl.add_to_hand(p4);
        pl.drawn = Some(inst("z3", 3));
        let acts = possible_actions(&s, 1);
        assert!(acts.contains(&Action::discard(inst("z3", 3).id)));
        assert!(acts.iter().all(|a| !matches!(a,
            Action::Discard { id } | Action::Riichi { id } | Action::OpenRiichi { id } if *id == p4.id)));
        assert!(matches!(execute(&s, 1, &Action::discard(p4.id)), Err(Error::IllegalAction { .. })));
    }

    #[test]
    fn test_oshidashi() {
        // 手牌がすべて待ち牌なら押し出しとして切れる
        let mut s = open_riichi_stage();
        let pl = &mut s.players[1];
        pl.hand = vec![inst("p1", 1), inst("p1", 2), inst("p4", 1), inst("p4", 2)];
        pl.drawn = Some(inst("p4", 3));
        pl.melds = vec![pon("m1", 2), pon("m9", 2), pon("s9", 2)];
        pl.is_menzen = false;

        let s = act(&s, 1, Action::discard(inst("p4", 3).id));
        assert!(s.players[1].discards.last().unwrap().is_oshidashi);
        assert!(possible_actions(&s, 0).contains(&Action::Ron));

        let s = act(&s, 0, Action::Ron);
        let w = match &s.result {
            Some(RoundResult::Win(w)) => w.clone(),
            r => panic!("unexpected result: {:?}", r),
        };
        assert_eq!(w.context.from, Some(1));
        assert!(w.context.yakus.contains(&("押し出し".to_string(), 13)));
        assert_eq!(w.deltas[1], -48000);
    }

    #[test]
    fn test_rejected_actions() {
        let s = new_round();
        let s0 = Stage::new(["a", "b", "c"], Rule::default());
        assert!(matches!(execute(&s0, 0, &Action::Draw), Err(Error::InvalidPhase { .. })));
        assert!(matches!(execute(&s, 1, &Action::Draw), Err(Error::IllegalAction { .. })));

        // 和了形だが役なしのロン
        let mut s = new_round();
        s.players[1].hand = insts("p2 p3 p6 p7 p8 s2 s3 s4 s6 s7 s8 z2 z2");
        let p4 = inst("p4", 2);
        s.players[0].discards.push(Discard {
            tile: p4,
            is_riichi: false,
            is_tsumogiri: false,
            called_by: None,
            is_oshidashi: false,
        });
        s.last_tile = Some(LastTile {
            seat: 0,
            tile: p4,
            kind: LastTileKind::Discard,
            ippatsu: None,
        });
        s.turn = 0;
        s.turn_phase = TurnPhase::Discard;
        assert!(!possible_actions(&s, 1).contains(&Action::Ron));
        assert!(matches!(execute(&s, 1, &Action::Ron), Err(Error::NoYaku)));

        // 拒否された操作は局面を変更しない
        let before = s.clone();
        let _ = execute(&s, 1, &Action::Ron);
        assert_eq!(s, before);
    }
}
