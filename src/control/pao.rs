use crate::model::*;

// [包 (責任払い)]
// 鳴き(呼び出し順)から包の責任者と対象の役満を返却
// 大三元: 3つ目の三元牌の鳴き, 大四喜: 4つ目の風牌の鳴き,
// 四槓子: 4つ目の明槓(加槓を含む), 四連刻: 同色で連続する4つ目の鳴き
pub fn find_liability(melds: &[Meld]) -> Option<(Seat, &'static str)> {
    // 鳴いた刻子,槓子. 加槓はポンと同じ相手から鳴いたものとして数える
    let called: Vec<&Meld> = melds
        .iter()
        .filter(|m| matches!(m.meld_type, MeldType::Pon | MeldType::Minkan | MeldType::Kakan))
        .filter(|m| m.from.is_some())
        .collect();

    let dragons: Vec<&&Meld> = called.iter().filter(|m| m.tile().is_doragon()).collect();
    if dragons.len() >= 3 {
        return dragons[2].from.map(|s| (s, "大三元"));
    }

    let winds: Vec<&&Meld> = called.iter().filter(|m| m.tile().is_wind()).collect();
    if winds.len() >= 4 {
        return winds[3].from.map(|s| (s, "大四喜"));
    }

    let kans: Vec<&&Meld> = called.iter().filter(|m| m.is_kan()).collect();
    if kans.len() >= 4 {
        return kans[3].from.map(|s| (s, "四槓子"));
    }

    for ti in [TM, TP, TS] {
        let suited: Vec<&&Meld> = called.iter().filter(|m| m.tile().0 == ti).collect();
        if suited.len() < 4 {
            continue;
        }
        // 連続する4つの数字を含む場合,その中で最後に鳴いたものが責任者
        for start in 1..=6 {
            let run: Vec<usize> = (start..start + 4)
                .filter_map(|n| suited.iter().position(|m| m.tile().1 == n))
                .collect();
            if run.len() == 4 {
                let last = run.iter().max().copied()?;
                return suited[last].from.map(|s| (s, "四連刻"));
            }
        }
    }

    None
}
