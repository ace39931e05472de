use log::{debug, warn};

use crate::model::*;
use crate::util::error::{Error, Res};

// [牌の保存則]
// 牌山,手牌,ツモ牌,河(鳴かれた牌を除く),面子,華牌に112枚がちょうど1回ずつ現れること
pub fn check_conservation(stg: &Stage) -> Res {
    let population = create_tiles();
    let mut seen = vec![false; TILE_COUNT];

    let mut tiles: Vec<TileInstance> = stg.wall.instances().copied().collect();
    for pl in &stg.players {
        tiles.extend(pl.hand.iter().copied());
        tiles.extend(pl.drawn.iter().copied());
        tiles.extend(
            pl.discards
                .iter()
                .filter(|d| d.called_by.is_none())
                .map(|d| d.tile),
        );
        for m in &pl.melds {
            tiles.extend(m.tiles.iter().copied());
        }
        tiles.extend(pl.flowers.iter().copied());
        tiles.extend(pl.pending_flowers.iter().copied());
    }

    for t in &tiles {
        match population.get(t.id) {
            Some(p) if p == t => {}
            _ => return Err(Error::snapshot(format!("unknown tile instance: {:?}", t))),
        }
        if seen[t.id] {
            return Err(Error::snapshot(format!("duplicated tile: {}", t)));
        }
        seen[t.id] = true;
    }
    if tiles.len() != TILE_COUNT {
        return Err(Error::snapshot(format!(
            "tile count mismatch: {} != {}",
            tiles.len(),
            TILE_COUNT
        )));
    }
    Ok(())
}

// 外部から受け取った局面で上書きする
// 保存則を満たさない場合はErrを返却し,呼び出し側は手元の局面を保持する
pub fn apply_external_state(local: &Stage, json: &str) -> Res<Stage> {
    let remote: Stage = serde_json::from_str(json)?;
    if let Err(e) = check_conservation(&remote) {
        warn!("snapshot rejected at step {}: {}", local.step, e);
        return Err(e);
    }
    debug!("snapshot applied: step {} -> {}", local.step, remote.step);
    Ok(remote)
}

#[cfg(test)]
mod tests {
    use super::super::round::start_round_with_wall;
    use super::super::wall::create_wall_from_seed;
    use super::*;

    #[test]
    fn test_snapshot() {
        let stg = Stage::new(["a", "b", "c"], Rule::default());
        assert!(check_conservation(&stg).is_err()); // 牌山が未生成

        let stg = start_round_with_wall(&stg, create_wall_from_seed(3)).unwrap();
        check_conservation(&stg).unwrap();
        let json = stg.to_json().unwrap();
        let applied = apply_external_state(&stg, &json).unwrap();
        assert_eq!(applied, stg);

        // 牌の重複
        let mut broken = stg.clone();
        let t = broken.players[1].hand[0];
        broken.players[2].hand.push(t);
        let json = broken.to_json().unwrap();
        assert!(matches!(
            apply_external_state(&stg, &json),
            Err(Error::InvalidSnapshot { .. })
        ));

        assert!(matches!(
            apply_external_state(&stg, "{"),
            Err(Error::Json(_))
        ));
    }
}
