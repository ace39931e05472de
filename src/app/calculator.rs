use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufRead};

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use log::error;

use sanma::hand::{evaluate_hand, WinCondition, YakuFlags};
use sanma::model::*;

#[derive(Debug, Args)]
pub struct CalculatorArgs {
    /// 手牌の式 (例: "p23678s234678z22p4/ES/立直")
    expression: Option<String>,

    /// 式をファイルから1行ずつ読み込む
    #[arg(short, long, conflicts_with = "expression")]
    file: Option<String>,

    /// 解析結果の詳細を表示
    #[arg(short, long)]
    detail: bool,
}

#[derive(Debug)]
pub struct CalculatorApp {
    args: CalculatorArgs,
}

impl CalculatorApp {
    pub fn new(args: CalculatorArgs) -> Self {
        Self { args }
    }

    pub fn run(self) -> Result<()> {
        match (&self.args.expression, &self.args.file) {
            (Some(exp), None) => {
                process_expression(exp, self.args.detail)?;
            }
            (None, Some(path)) => self.run_from_file(path)?,
            _ => bail!("either EXPRESSION or --file must be specified"),
        }
        Ok(())
    }

    fn run_from_file(&self, path: &str) -> Result<()> {
        let file = File::open(path).with_context(|| format!("failed to open: {}", path))?;
        let mut n_error = 0;
        for line in io::BufReader::new(file).lines() {
            let exp = line?;
            let e = exp.replace(' ', "");
            if e.is_empty() || e.starts_with('#') {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
            } else {
                match process_expression(&exp, self.args.detail) {
                    Ok(Verify::Error) => n_error += 1,
                    Ok(_) => {}
                    Err(e) => {
                        error!("{:#}", e);
                        n_error += 1;
                    }
                }
            }
            println!();
        }
        if n_error > 0 {
            bail!("{} expression(s) failed", n_error);
        }
        Ok(())
    }
}

fn process_expression(exp: &str, detail: bool) -> Result<Verify> {
    println!("> {}", exp);
    let calc = Calculator::parse(exp)?;
    if detail {
        println!("{:?}", calc);
    }
    Ok(calc.run(detail))
}

#[derive(Debug, PartialEq, Eq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

// 式の書式: 手牌[+],副露,.. / 場風自風,ドラ,裏ドラ / 条件役,.. / 翻,得点
// * 手牌の最後の牌が和了牌, 末尾の'+'はロン和了
// * 数字0は金牌の5 (p0, s0) または白ポッチ (z0)
// * 副露の'+'は鳴いた牌 ('+'のない4枚は暗槓)
// * 白ポッチの変化先は条件役に "白ポッチ=s9" の形式で指定
#[derive(Debug)]
struct Calculator {
    hand: Vec<TileInstance>,
    melds: Vec<Meld>,
    winning_tile: Tile,
    joker: Option<Tile>,
    cond: WinCondition,
    expected: Option<(usize, Point)>,
}

impl Calculator {
    fn parse(input: &str) -> Result<Self> {
        let input = input.replace(' ', "");
        let input = input.split('#').next().unwrap_or_default(); // コメント削除
        let exps: Vec<&str> = input.split('/').collect();

        let mut calc = Self {
            hand: vec![],
            melds: vec![],
            winning_tile: Z8,
            joker: None,
            cond: WinCondition {
                doras: vec![],
                ura_doras: vec![],
                is_drawn: true,
                is_dealer: true,
                prevalent_wind: WE,
                seat_wind: WE,
                honba: 0,
                honba_bonus: Rule::default().honba_bonus,
                yaku_flags: YakuFlags::default(),
            },
            expected: None,
        };

        let mut pool = TilePool::new();
        if let Some(e) = exps.first() {
            calc.parse_hand_meld(e, &mut pool)?;
        }
        if let Some(e) = exps.get(1) {
            calc.parse_stage_info(e)?;
        }
        if let Some(e) = exps.get(2) {
            calc.parse_yaku_flags(e)?;
        }
        if let Some(e) = exps.get(3) {
            calc.parse_score_verify(e)?;
        }
        Ok(calc)
    }

    fn run(&self, detail: bool) -> Verify {
        let ctx = evaluate_hand(
            &self.hand,
            &self.melds,
            self.winning_tile,
            self.joker,
            &self.cond,
        );

        let (fan, score) = match &ctx {
            Some(ctx) => {
                if detail {
                    println!("{:?}", ctx);
                }
                let mut yakus = String::new();
                for (name, fan) in &ctx.yakus {
                    let _ = write!(yakus, "{}({}), ", name, fan);
                }
                println!("yakus: {}", yakus);
                println!(
                    "fan: {}, yakuman: {}, score: {}, {}",
                    ctx.fan, ctx.yakuman, ctx.score, ctx.title
                );
                let (ron, child, dealer) = ctx.points;
                if !self.cond.is_drawn {
                    println!("points: ron {}", ron);
                } else if self.cond.is_dealer {
                    println!("points: {} all", child);
                } else {
                    println!("points: {}-{}", child, dealer);
                }
                (ctx.fan, ctx.score)
            }
            None => {
                println!("not win hand");
                (0, 0)
            }
        };

        let verify = match self.expected {
            None => Verify::Skip,
            Some((ef, es)) => {
                // 役満は得点のみを比較
                let is_yakuman = ctx.as_ref().map_or(false, |c| c.yakuman > 0);
                if es == score && (is_yakuman || ef == fan) {
                    Verify::Ok
                } else {
                    Verify::Error
                }
            }
        };
        println!("verify: {:?}", verify);
        verify
    }

    fn parse_hand_meld(&mut self, input: &str, pool: &mut TilePool) -> Result<()> {
        let mut exps = input.split(',');
        let exp_hand = exps.next().unwrap_or_default();
        if exp_hand.ends_with('+') {
            self.cond.is_drawn = false;
        }

        for t in tiles_from_string(&exp_hand.replace('+', ""))? {
            self.hand.push(pool.take(t)?);
        }
        self.winning_tile = self
            .hand
            .last()
            .map(|t| t.tile)
            .ok_or_else(|| anyhow!("empty hand"))?;

        for exp in exps {
            let meld = meld_from_string(exp, pool)?;
            self.melds.push(meld);
        }
        Ok(())
    }

    fn parse_stage_info(&mut self, input: &str) -> Result<()> {
        let exps: Vec<&str> = input.split(',').collect();
        if let Some(winds) = exps.first() {
            let chars: Vec<char> = winds.chars().collect();
            if chars.len() != 2 {
                bail!("stage info len is not 2: {}", winds);
            }
            self.cond.prevalent_wind = wind_from_char(chars[0])?;
            self.cond.seat_wind = wind_from_char(chars[1])?;
            self.cond.is_dealer = self.cond.seat_wind == WE;
        }
        if let Some(e) = exps.get(1) {
            self.cond.doras = tiles_from_string(e)?.into_iter().map(|(t, _)| t).collect();
        }
        if let Some(e) = exps.get(2) {
            self.cond.ura_doras = tiles_from_string(e)?.into_iter().map(|(t, _)| t).collect();
        }
        Ok(())
    }

    fn parse_yaku_flags(&mut self, input: &str) -> Result<()> {
        let f = &mut self.cond.yaku_flags;
        for y in input.split(',') {
            if let Some(sym) = y.strip_prefix("白ポッチ=") {
                self.joker = Some(Tile::from_symbol(sym)?);
                continue;
            }
            match y {
                "立直" => f.riichi = true,
                "両立直" => f.dabururiichi = true,
                "オープン立直" => f.open_riichi = true,
                "一発" => f.ippatsu = true,
                "海底摸月" => f.haiteiraoyue = true,
                "河底撈魚" => f.houteiraoyui = true,
                "嶺上開花" => f.rinshankaihou = true,
                "槍槓" => f.chankan = true,
                "天和" => f.tenhou = true,
                "地和" => f.tiihou = true,
                "人和" => f.renhou = true,
                "押し出し" => f.oshidashi = true,
                "" => {}
                _ => bail!("invalid conditional yaku: {}", y),
            }
        }
        Ok(())
    }

    fn parse_score_verify(&mut self, input: &str) -> Result<()> {
        let exps: Vec<&str> = input.split(',').collect();
        if exps.len() != 2 {
            bail!("invalid score verify info: {}", input);
        }
        self.expected = Some((exps[0].parse()?, exps[1].parse()?));
        Ok(())
    }
}

// 式中の牌に対応するTileInstanceを割り当てる
// 金牌,白ポッチは明示した場合のみ使用
#[derive(Debug)]
struct TilePool {
    tiles: Vec<TileInstance>,
    used: Vec<bool>,
}

impl TilePool {
    fn new() -> Self {
        Self {
            tiles: create_tiles(),
            used: vec![false; TILE_COUNT],
        }
    }

    fn take(&mut self, (tile, special): (Tile, bool)) -> Result<TileInstance> {
        let i = (0..self.tiles.len())
            .rev()
            .find(|&i| {
                let t = &self.tiles[i];
                !self.used[i] && t.tile == tile && (t.is_gold || t.is_joker) == special
            })
            .ok_or_else(|| anyhow!("too many tiles: {}", tile))?;
        self.used[i] = true;
        Ok(self.tiles[i])
    }
}

// "p123s0z55" -> [(p1,false), (p2,false), (p3,false), (s5,true), (z5,false), (z5,false)]
// 2要素目は金牌または白ポッチ
fn tiles_from_string(exp: &str) -> Result<Vec<(Tile, bool)>> {
    let mut tiles = vec![];
    let mut ti = None;
    for c in exp.chars() {
        match c {
            'm' => ti = Some(TM),
            'p' => ti = Some(TP),
            's' => ti = Some(TS),
            'z' => ti = Some(TZ),
            '0'..='9' => {
                let ti = ti.ok_or_else(|| anyhow!("tile number before tile type"))?;
                let ni = c.to_digit(10).unwrap_or_default() as usize;
                let t = match (ti, ni) {
                    (TP | TS, 0) => (Tile(ti, 5), true),
                    (TZ, 0) => (Tile(TZ, DW), true),
                    _ => (Tile(ti, ni), false),
                };
                if !t.0.is_legal() {
                    bail!("invalid tile: {}{}", ['m', 'p', 's', 'z'][ti], ni);
                }
                tiles.push(t);
            }
            _ => bail!("invalid char: '{}'", c),
        }
    }
    Ok(tiles)
}

fn meld_from_string(exp: &str, pool: &mut TilePool) -> Result<Meld> {
    let mut called = None;
    let mut symbols = String::new();
    for c in exp.chars() {
        if c == '+' {
            called = Some(symbols.len());
        } else {
            symbols.push(c);
        }
    }

    let mut tiles = vec![];
    let mut called_id = None;
    let mut pos = 0;
    for c in symbols.chars() {
        pos += 1;
        if !c.is_ascii_digit() {
            continue;
        }
        let t = tiles_from_string(&format!("{}{}", type_char(&symbols, pos - 1), c))?;
        let inst = pool.take(t[0])?;
        if called == Some(pos) {
            called_id = Some(inst.id);
        }
        tiles.push(inst);
    }

    if tiles.is_empty() || tiles.iter().any(|t| t.tile != tiles[0].tile) {
        bail!("invalid meld: '{}'", exp);
    }
    let meld_type = match (tiles.len(), called_id) {
        (3, _) => MeldType::Pon,
        (4, Some(_)) => MeldType::Minkan,
        (4, None) => MeldType::Ankan,
        _ => bail!("invalid meld: '{}'", exp),
    };
    // 点数計算では鳴いた相手は関係ないので固定
    let from = if meld_type == MeldType::Ankan { None } else { Some(1) };
    Ok(Meld {
        meld_type,
        tiles,
        from,
        called: called_id,
    })
}

// symbolsのpos番目の数字に対応する種別文字
fn type_char(symbols: &str, pos: usize) -> char {
    symbols
        .chars()
        .take(pos)
        .filter(|c| matches!(c, 'm' | 'p' | 's' | 'z'))
        .last()
        .unwrap_or('?')
}

fn wind_from_char(c: char) -> Result<Tnum> {
    Ok(match c {
        'E' => WE,
        'S' => WS,
        'W' => WW,
        'N' => WN,
        _ => bail!("invalid wind symbol: {}", c),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify(exp: &str) -> Verify {
        Calculator::parse(exp).unwrap().run(false)
    }

    #[test]
    fn test_calculator() {
        let cases = [
            // カラス
            "p23678s234678z22p4/ES/立直/0,32000",
            // 門前自摸 + 平和 + 断幺九 + 赤2
            "p456s456678p238p8p4/ES//5,12000",
            // 大三元 (ロン)
            "p99z55566677z7+,s888+/ES//0,32000",
            // 役なし
            "p23678s234678z22p4+/ES//0,0",
        ];
        for exp in cases {
            assert_ne!(Verify::Error, verify(exp), "{}", exp);
        }
    }

    #[test]
    fn test_parse() {
        let calc = Calculator::parse("p0p23s0z0z55+,m999+,s7777/SW,p3/白ポッチ=s9").unwrap();
        assert!(!calc.cond.is_drawn);
        assert!(!calc.cond.is_dealer);
        assert_eq!(calc.cond.prevalent_wind, WS);
        assert_eq!(calc.cond.doras, vec![Tile(TP, 3)]);
        assert_eq!(calc.joker, Some(Tile(TS, 9)));
        assert_eq!(calc.winning_tile, Tile(TZ, DW));
        assert_eq!(calc.hand.iter().filter(|t| t.is_gold).count(), 2);
        assert_eq!(calc.hand.iter().filter(|t| t.is_joker).count(), 1);
        assert_eq!(calc.melds[0].meld_type, MeldType::Pon);
        assert_eq!(calc.melds[1].meld_type, MeldType::Ankan);
        assert!(calc.melds[1].from.is_none());

        assert!(Calculator::parse("p1x").is_err());
        assert!(Calculator::parse("m2").is_err());
        assert!(Calculator::parse("p11111").is_err());
        assert!(Calculator::parse("p1/E").is_err());
    }
}
