use rand::prelude::*;

use crate::model::*;

// 112枚をシャッフルして牌山を生成
pub fn create_wall<R: Rng + ?Sized>(rng: &mut R) -> Wall {
    let mut tiles = create_tiles();
    tiles.shuffle(rng);
    Wall::from_tiles(tiles)
}

pub fn create_wall_from_seed(seed: u64) -> Wall {
    let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
    create_wall(&mut rng)
}

// デバッグ用に作為的な牌山を生成 指定がない場所はシード値に従ってランダムに生成
// hands: 配牌 (親から順に最大13枚), live: 親の14枚目以降のツモ山の先頭
pub fn create_wall_debug(seed: u64, hands: [&[&str]; SEAT], live: &[&str]) -> Wall {
    let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
    let mut rest = create_tiles();
    rest.shuffle(&mut rng);

    let mut take = |sym: &str| -> Option<TileInstance> {
        let t: Tile = sym.parse().ok()?;
        let i = rest.iter().position(|x| x.tile == t)?;
        Some(rest.remove(i))
    };
    let hands: Vec<Vec<TileInstance>> = hands
        .iter()
        .map(|h| h.iter().filter_map(|s| take(*s)).collect())
        .collect();
    let live: Vec<TileInstance> = live.iter().filter_map(|s| take(*s)).collect();

    // 配牌順 (子2人が交互に13枚, 親が14枚) に並べる
    let mut fill = |v: &[TileInstance], i: usize| -> TileInstance {
        v.get(i).copied().unwrap_or_else(|| rest.remove(0))
    };
    let mut tiles = vec![];
    for i in 0..13 {
        tiles.push(fill(&hands[1], i));
        tiles.push(fill(&hands[2], i));
    }
    for i in 0..13 {
        tiles.push(fill(&hands[0], i));
    }
    tiles.extend(live);
    tiles.append(&mut rest);
    Wall::from_tiles(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_wall() {
        let w1 = create_wall_from_seed(1);
        let w2 = create_wall_from_seed(1);
        assert_eq!(w1, w2);
        assert_eq!(w1.instances().count(), TILE_COUNT);
        let mut ids: Vec<TileId> = w1.instances().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..TILE_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn test_debug_wall() {
        let h0: &[&str] = &["p1", "p1", "p1"];
        let w = create_wall_debug(0, [h0, &[], &[]], &["z7"]);
        assert_eq!(w.instances().count(), TILE_COUNT);
        // 親の配牌は27枚目から
        assert_eq!(w.live[26].tile, Tile(TP, 1));
        assert_eq!(w.live[28].tile, Tile(TP, 1));
        assert_eq!(w.live[39].tile, Tile(TZ, DR));
    }
}
