use std::fmt;

use crate::model::*;

use super::parse::{ParsedHand, SetPair, SetPairType};

use SetPairType::*;

// 特殊形&特殊条件の役 外部から設定を行う
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct YakuFlags {
    pub riichi: bool,
    pub dabururiichi: bool,
    pub open_riichi: bool,
    pub ippatsu: bool,
    pub haiteiraoyue: bool,
    pub houteiraoyui: bool,
    pub rinshankaihou: bool,
    pub chankan: bool,
    pub tenhou: bool,
    pub tiihou: bool,
    pub renhou: bool,
    pub oshidashi: bool, // オープンリーチ者への押し出し牌でのロン
}

#[derive(Debug)]
pub struct YakuContext {
    hand: TileTable,         // 門前の手牌(和了牌を含む) 九蓮宝燈の判定などに使用
    all_tiles: TileTable,    // 鳴きを含むすべての牌 (槓子は3枚として数える)
    parsed_hand: ParsedHand, // 鳴きを含むすべての面子
    pair_tile: Option<Tile>, // 雀頭の牌 (七対子,国士無双はNone)
    winning_tile: Tile,      // 上がり牌
    is_self_drawn: bool,     // ツモ和了
    is_open: bool,           // 鳴きの有無
    prevalent_wind: Tnum,    // 場風 (東: 1, 南: 2)
    seat_wind: Tnum,         // 自風 (東: 1, 南: 2, 西: 3)
    yaku_flags: YakuFlags,   // 組み合わせ以外による役
    counts: Counts,          // 面子や牌種別のカウント
    iipeikou_count: usize,   // 一盃口, 二盃口用
    yakuhai_check: TileRow,  // 役牌面子のカウント(雀頭は含まない)
}

impl YakuContext {
    pub fn new(
        hand: TileTable,
        parsed_hand: ParsedHand,
        winning_tile: Tile,
        prevalent_wind: Tnum,
        seat_wind: Tnum,
        is_self_drawn: bool,
        yaku_flags: YakuFlags,
    ) -> Self {
        let pair_tile = get_pair(&parsed_hand);
        let mut counts = count_type(&parsed_hand);
        let iipeikou_count = count_iipeikou(&parsed_hand);
        let yakuhai_check = check_yakuhai(&parsed_hand);
        let is_open = counts.pon + counts.minkan_open != 0;

        // ロンで完成した刻子は明刻扱い
        if !is_self_drawn && is_completed_by_ron(&parsed_hand, winning_tile) {
            counts.ankou_total -= 1;
        }

        let mut all_tiles = hand;
        for sp in &parsed_hand {
            if matches!(sp.0, Pon | Minkan | Ankan) {
                all_tiles[sp.1 .0][sp.1 .1] += 3;
            }
        }

        Self {
            hand,
            all_tiles,
            parsed_hand,
            pair_tile,
            winning_tile,
            is_self_drawn,
            is_open,
            prevalent_wind,
            seat_wind,
            yaku_flags,
            counts,
            iipeikou_count,
            yakuhai_check,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[inline]
    pub fn parsed_hand(&self) -> &ParsedHand {
        &self.parsed_hand
    }

    // (役一覧, 役満倍数, 翻数)を返却
    // 役満が含まれている場合、役満の役のみを返却 (翻数は0)
    pub fn calc_yaku(&self) -> (Vec<(&'static str, usize)>, usize, usize) {
        let mut yaku = vec![];
        for y in YAKU_LIST {
            if self.is_open && y.fan_open == 0 {
                continue; // 門前限定
            }
            if (y.func)(self) {
                yaku.push(y);
            }
        }

        let yakuman: Vec<&Yaku> = yaku.iter().copied().filter(|y| y.fan_close >= 13).collect();
        if !yakuman.is_empty() {
            let m = yakuman.iter().map(|y| y.fan_close - 12).sum();
            let list = yakuman.iter().map(|y| (y.name, y.fan_close)).collect();
            return (list, m, 0);
        }

        // 上位役による下位役の削除
        let names: Vec<&str> = yaku.iter().map(|y| y.name).collect();
        let mut excluded = vec![];
        for &(upper, lowers) in SUPERSEDE_LIST {
            if names.contains(&upper) {
                excluded.extend_from_slice(lowers);
            }
        }
        yaku.retain(|y| !excluded.contains(&y.name));

        let mut list: Vec<(&'static str, usize)> = yaku
            .iter()
            .map(|y| {
                let fan = if self.is_open { y.fan_open } else { y.fan_close };
                (y.name, fan)
            })
            .collect();

        // 4枚使い七対子 (1組につき4翻)
        let n4 = count_four_tile_pairs(self);
        if n4 > 0 {
            list.push(("四枚使い", 4 * n4));
        }

        let fan = list.iter().map(|y| y.1).sum();
        (list, 0, fan)
    }
}

#[derive(Debug, Default)]
struct Counts {
    pair: usize,
    shuntsu: usize,
    koutsu: usize,
    pon: usize,
    minkan: usize,
    minkan_open: usize,  // 明槓 (暗槓を除く)
    ankan: usize,
    koutsu_total: usize, // koutsu + pon + minkan + ankan
    ankou_total: usize,  // koutsu + ankan
    kantsu_total: usize, // minkan + ankan
}

fn get_pair(ph: &ParsedHand) -> Option<Tile> {
    let pairs: Vec<Tile> = ph
        .iter()
        .filter(|sp| sp.0 == Pair)
        .map(|sp| sp.1)
        .collect();
    if pairs.len() == 1 {
        Some(pairs[0])
    } else {
        None // 七対子, 国士無双
    }
}

fn count_type(ph: &ParsedHand) -> Counts {
    let mut cnt = Counts::default();
    for SetPair(tp, _) in ph {
        match tp {
            Pair => cnt.pair += 1,
            Shuntsu => cnt.shuntsu += 1,
            Koutsu => cnt.koutsu += 1,
            Pon => cnt.pon += 1,
            Minkan => {
                cnt.minkan += 1;
                cnt.minkan_open += 1;
            }
            Ankan => cnt.ankan += 1,
        }
    }
    cnt.koutsu_total = cnt.koutsu + cnt.pon + cnt.minkan + cnt.ankan;
    cnt.ankou_total = cnt.koutsu + cnt.ankan;
    cnt.kantsu_total = cnt.minkan + cnt.ankan;

    cnt
}

// 和了牌が刻子にしか使えない分解 (シャンポン待ち) の場合true
fn is_completed_by_ron(ph: &ParsedHand, wt: Tile) -> bool {
    let has_koutsu = ph.iter().any(|sp| sp.0 == Koutsu && sp.1 == wt);
    let other_use = ph.iter().any(|sp| match sp.0 {
        Pair => sp.1 == wt,
        Shuntsu => sp.1 .0 == wt.0 && sp.1 .1 <= wt.1 && wt.1 <= sp.1 .1 + 2,
        _ => false,
    });
    has_koutsu && !other_use
}

fn count_iipeikou(ph: &ParsedHand) -> usize {
    let mut shuntsu = TileTable::default();
    for SetPair(tp, t) in ph {
        if let Shuntsu = tp {
            shuntsu[t.0][t.1] += 1;
        }
    }
    shuntsu.iter().flatten().map(|n| n / 2).sum()
}

fn check_yakuhai(ph: &ParsedHand) -> TileRow {
    let mut tr = TileRow::default();
    for sp in ph {
        if sp.is_triplet() && sp.1.is_honor() {
            tr[sp.1 .1] += 1;
        }
    }

    tr
}

fn count_four_tile_pairs(ctx: &YakuContext) -> usize {
    if !is_chiitoitsu(ctx) {
        return 0;
    }
    ctx.hand.iter().flatten().filter(|&&n| n == 4).count()
}

pub struct Yaku {
    pub name: &'static str,
    pub func: fn(&YakuContext) -> bool,
    pub fan_close: usize, // 鳴きなしの翻
    pub fan_open: usize,  // 鳴きありの翻(食い下がり) 0は門前限定
}

impl fmt::Debug for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.name, self.fan_close, self.fan_open)
    }
}

macro_rules! yaku {
    ($n: expr, $f: expr, $c: expr, $o: expr) => {
        Yaku {
            name: $n,
            func: $f,
            fan_close: $c,
            fan_open: $o,
        }
    };
}

static YAKU_LIST: &[Yaku] = &[
    // 役満
    yaku!("天和", is_tenhou, 13, 0),
    yaku!("地和", is_tiihou, 13, 0),
    yaku!("人和", is_renhou, 13, 0),
    yaku!("国士無双", is_kokushimusou, 13, 0),
    yaku!("四暗刻", is_suuankou, 13, 0),
    yaku!("大三元", is_daisangen, 13, 13),
    yaku!("小四喜", is_shousuushii, 13, 13),
    yaku!("大四喜", is_daisuushii, 14, 14),
    yaku!("字一色", is_tuuiisou, 13, 13),
    yaku!("緑一色", is_ryuuiisou, 13, 13),
    yaku!("清老頭", is_chinroutou, 13, 13),
    yaku!("四槓子", is_suukantsu, 13, 13),
    yaku!("九蓮宝燈", is_chuurenpoutou, 13, 0),
    yaku!("大車輪", is_daisharin, 13, 0),
    yaku!("四連刻", is_suurenkou, 13, 13),
    yaku!("萬子混一色", is_manzu_honiisou, 13, 13),
    yaku!("押し出し", is_oshidashi, 13, 13),
    // 特殊条件
    yaku!("門前清自摸和", is_menzentsumo, 1, 0),
    yaku!("立直", is_riichi, 1, 0),
    yaku!("ダブル立直", is_dabururiichi, 2, 0),
    yaku!("オープン立直", is_open_riichi, 2, 0),
    yaku!("一発", is_ippatsu, 1, 0),
    yaku!("海底摸月", is_haiteiraoyue, 1, 1),
    yaku!("河底撈魚", is_houteiraoyui, 1, 1),
    yaku!("嶺上開花", is_rinshankaihou, 1, 1),
    yaku!("槍槓", is_chankan, 1, 1),
    // 役牌
    yaku!("場風", is_bakaze, 1, 1),
    yaku!("自風", is_jikaze, 1, 1),
    yaku!("連風牌", is_renfuuhai, 2, 2),
    yaku!("白", is_haku, 1, 1),
    yaku!("發", is_hatsu, 1, 1),
    yaku!("中", is_chun, 1, 1),
    yaku!("北", is_pei, 1, 1),
    // 組み合わせ
    yaku!("平和", is_pinfu, 1, 0),
    yaku!("断幺九", is_tanyaochuu, 1, 1),
    yaku!("一盃口", is_iipeikou, 1, 0),
    yaku!("二盃口", is_ryanpeikou, 3, 0),
    yaku!("対々和", is_toitoihou, 2, 2),
    yaku!("三暗刻", is_sanankou, 2, 2),
    yaku!("三連刻", is_sanrenkou, 2, 2),
    yaku!("三槓子", is_sankantsu, 2, 2),
    yaku!("小三元", is_shousangen, 2, 2),
    yaku!("混老頭", is_honroutou, 2, 2),
    yaku!("三風刻", is_sanpuukou, 2, 2),
    yaku!("一気通貫", is_ikkitsuukan, 2, 1),
    yaku!("混全帯幺九", is_chanta, 2, 1),
    yaku!("純全帯幺九", is_junchan, 3, 2),
    yaku!("七対子", is_chiitoitsu, 2, 0),
    yaku!("混一色", is_honiisou, 3, 2),
    yaku!("清一色", is_chiniisou, 6, 5),
    yaku!("小車輪", is_shousharin, 6, 0),
];

// 役の優先順位 =================================================================
// * 役満が存在する場合は役満以外の役は削除
// * 左側の役が成立している場合,右側の役は削除
static SUPERSEDE_LIST: &[(&str, &[&str])] = &[
    ("二盃口", &["一盃口"]),
    ("清一色", &["混一色"]),
    ("小車輪", &["七対子", "混一色"]),
];

// 天和
fn is_tenhou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.tenhou
}

// 地和
fn is_tiihou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.tiihou
}

// 人和
fn is_renhou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.renhou
}

// 国士無双
fn is_kokushimusou(ctx: &YakuContext) -> bool {
    ctx.parsed_hand.is_empty()
}

// 四暗刻 (ツモのみ)
fn is_suuankou(ctx: &YakuContext) -> bool {
    ctx.is_self_drawn && ctx.counts.ankou_total == 4
}

// 大三元
fn is_daisangen(ctx: &YakuContext) -> bool {
    let y = &ctx.yakuhai_check;
    y[DW] + y[DG] + y[DR] == 3
}

// 小四喜
fn is_shousuushii(ctx: &YakuContext) -> bool {
    let y = &ctx.yakuhai_check;
    let pair_is_wind = ctx.pair_tile.map_or(false, |t| t.is_wind());
    y[WE] + y[WS] + y[WW] + y[WN] == 3 && pair_is_wind
}

// 大四喜
fn is_daisuushii(ctx: &YakuContext) -> bool {
    let y = &ctx.yakuhai_check;
    y[WE] + y[WS] + y[WW] + y[WN] == 4
}

// 字一色
fn is_tuuiisou(ctx: &YakuContext) -> bool {
    all_tiles_match(ctx, |t| t.is_honor())
}

// 緑一色
fn is_ryuuiisou(ctx: &YakuContext) -> bool {
    all_tiles_match(ctx, |t| t.is_green())
}

// 清老頭
fn is_chinroutou(ctx: &YakuContext) -> bool {
    all_tiles_match(ctx, |t| t.is_terminal())
}

// 四槓子
fn is_suukantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 4
}

// 九蓮宝燈
fn is_chuurenpoutou(ctx: &YakuContext) -> bool {
    for ti in [TP, TS] {
        let tr = &ctx.hand[ti];
        if tr.iter().sum::<usize>() != 14 {
            continue;
        }
        let base = [0, 3, 1, 1, 1, 1, 1, 1, 1, 3];
        return (1..TNUM).all(|ni| tr[ni] >= base[ni]);
    }
    false
}

// 大車輪 (清一色七対子)
fn is_daisharin(ctx: &YakuContext) -> bool {
    is_chiitoitsu(ctx) && suit_types(ctx).len() == 1 && !has_honor(ctx)
}

// 四連刻
fn is_suurenkou(ctx: &YakuContext) -> bool {
    max_consecutive_triplets(ctx) >= 4
}

// 萬子混一色 (萬子と字牌のみ)
fn is_manzu_honiisou(ctx: &YakuContext) -> bool {
    suit_types(ctx) == vec![TM] && has_honor(ctx)
}

// 押し出し
fn is_oshidashi(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.oshidashi
}

// 門前清自摸和
fn is_menzentsumo(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.is_self_drawn
}

// 立直
fn is_riichi(ctx: &YakuContext) -> bool {
    let f = &ctx.yaku_flags;
    f.riichi && !f.dabururiichi && !f.open_riichi
}

// ダブル立直
fn is_dabururiichi(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.dabururiichi
}

// オープン立直
fn is_open_riichi(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.open_riichi
}

// 一発
fn is_ippatsu(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.ippatsu
}

// 海底摸月
fn is_haiteiraoyue(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.haiteiraoyue
}

// 河底撈魚
fn is_houteiraoyui(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.houteiraoyui
}

// 嶺上開花
fn is_rinshankaihou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.rinshankaihou
}

// 槍槓
fn is_chankan(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.chankan
}

// 場風
fn is_bakaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.prevalent_wind] >= 1
}

// 自風
fn is_jikaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.seat_wind] >= 1
}

// 連風牌 (場風と自風に加算)
fn is_renfuuhai(ctx: &YakuContext) -> bool {
    ctx.prevalent_wind == ctx.seat_wind && ctx.yakuhai_check[ctx.seat_wind] >= 1
}

// 白
fn is_haku(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DW] >= 1
}

// 發
fn is_hatsu(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DG] >= 1
}

// 中
fn is_chun(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DR] >= 1
}

// 北 (三麻では常に役牌)
fn is_pei(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[WN] >= 1
}

// 平和 (待ちの形は問わない)
fn is_pinfu(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu != 4 {
        return false;
    }

    match ctx.pair_tile {
        Some(pt) => {
            !(pt.is_doragon()
                || pt == Tile(TZ, WN)
                || pt == Tile(TZ, ctx.prevalent_wind)
                || pt == Tile(TZ, ctx.seat_wind))
        }
        None => false,
    }
}

// 断么九
fn is_tanyaochuu(ctx: &YakuContext) -> bool {
    all_tiles_match(ctx, |t| t.is_simple())
}

// 一盃口
fn is_iipeikou(ctx: &YakuContext) -> bool {
    ctx.iipeikou_count == 1
}

// 二盃口
fn is_ryanpeikou(ctx: &YakuContext) -> bool {
    ctx.iipeikou_count == 2
}

// 対々和
fn is_toitoihou(ctx: &YakuContext) -> bool {
    ctx.counts.koutsu_total == 4
}

// 三暗刻
fn is_sanankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total >= 3
}

// 三連刻
fn is_sanrenkou(ctx: &YakuContext) -> bool {
    max_consecutive_triplets(ctx) == 3
}

// 三槓子
fn is_sankantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 3
}

// 小三元
fn is_shousangen(ctx: &YakuContext) -> bool {
    let y = &ctx.yakuhai_check;
    let pair_is_doragon = ctx.pair_tile.map_or(false, |t| t.is_doragon());
    y[DW] + y[DG] + y[DR] == 2 && pair_is_doragon
}

// 混老頭
fn is_honroutou(ctx: &YakuContext) -> bool {
    all_tiles_match(ctx, |t| t.is_end())
}

// 三風刻
fn is_sanpuukou(ctx: &YakuContext) -> bool {
    let y = &ctx.yakuhai_check;
    y[WE] + y[WS] + y[WW] + y[WN] == 3
}

// 一気通貫
fn is_ikkitsuukan(ctx: &YakuContext) -> bool {
    for ti in [TP, TS] {
        let mut f147 = [false; 3];
        for SetPair(tp, t) in &ctx.parsed_hand {
            if *tp == Shuntsu && t.0 == ti && matches!(t.1, 1 | 4 | 7) {
                f147[t.1 / 3] = true;
            }
        }
        if f147.iter().all(|&f| f) {
            return true;
        }
    }
    false
}

// 混全帯幺九
fn is_chanta(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu == 0 || ctx.parsed_hand.is_empty() {
        return false;
    }
    let has_honor_set = ctx.parsed_hand.iter().any(|sp| sp.1.is_honor());
    has_honor_set
        && ctx
            .parsed_hand
            .iter()
            .all(|sp| sp.tiles().iter().any(|t| t.is_end()))
}

// 純全帯幺九
fn is_junchan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu == 0 {
        return false;
    }
    ctx.parsed_hand
        .iter()
        .all(|sp| sp.tiles().iter().any(|t| t.is_terminal()))
}

// 七対子
fn is_chiitoitsu(ctx: &YakuContext) -> bool {
    ctx.counts.pair == 7
}

// 混一色
fn is_honiisou(ctx: &YakuContext) -> bool {
    suit_types(ctx).len() == 1 && has_honor(ctx)
}

// 清一色
fn is_chiniisou(ctx: &YakuContext) -> bool {
    suit_types(ctx).len() == 1 && !has_honor(ctx)
}

// 小車輪 (混一色七対子)
fn is_shousharin(ctx: &YakuContext) -> bool {
    is_chiitoitsu(ctx) && is_honiisou(ctx)
}

// [ユーティリティ]

fn all_tiles_match(ctx: &YakuContext, f: impl Fn(&Tile) -> bool) -> bool {
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if ctx.all_tiles[ti][ni] > 0 && !f(&Tile(ti, ni)) {
                return false;
            }
        }
    }
    true
}

// 使用されている数牌の種別
fn suit_types(ctx: &YakuContext) -> Vec<Type> {
    (0..TZ)
        .filter(|&ti| ctx.all_tiles[ti].iter().sum::<usize>() > 0)
        .collect()
}

fn has_honor(ctx: &YakuContext) -> bool {
    ctx.all_tiles[TZ].iter().sum::<usize>() > 0
}

// 同じ種別の数牌で連続する刻子の最大数
fn max_consecutive_triplets(ctx: &YakuContext) -> usize {
    let mut tt = TileTable::default();
    for sp in &ctx.parsed_hand {
        if sp.is_triplet() && sp.1.is_suit() {
            tt[sp.1 .0][sp.1 .1] = 1;
        }
    }
    let mut max = 0;
    for ti in 0..TZ {
        let mut n = 0;
        for ni in 1..TNUM {
            if tt[ti][ni] == 1 {
                n += 1;
                max = max.max(n);
            } else {
                n = 0;
            }
        }
    }
    max
}
