mod nop;
mod random;

use std::fmt;

use crate::listener::Listener;
use crate::model::*;
use crate::util::error::{Error, Res};
use crate::util::variant::*;

pub use nop::Nop;
pub use random::RandomCpu;

#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub args: Vec<Arg>,
}

impl Config {
    pub fn get_arg(&self, name: &str) -> Option<&Variant> {
        self.args.iter().find(|a| a.name == name).map(|a| &a.value)
    }
}

// Actor trait
pub trait Actor: Listener + ActorClone + Send {
    // 局開始時の初期化処理
    fn init(&mut self, _seat: Seat) {}

    // 可能なアクションの選択 (actsは空でない)
    // 合法手以外を返した場合,見送りまたは最初の合法手で代替される
    fn select_action(&mut self, stg: &Stage, seat: Seat, acts: &[Action]) -> Action;

    // Actorの詳細表示用
    fn get_config(&self) -> &Config;
}

impl fmt::Debug for dyn Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conf = self.get_config();
        let arg_str = conf
            .args
            .iter()
            .map(|a| format!("{}={}", a.name, a.value))
            .collect::<Vec<String>>()
            .join(",");
        write!(f, "{}({})", conf.name, arg_str)
    }
}

// https://stackoverflow.com/questions/30353462/how-to-clone-a-struct-storing-a-boxed-trait-object
pub trait ActorClone {
    fn clone_box(&self) -> Box<dyn Actor>;
}

impl<T> ActorClone for T
where
    T: 'static + Actor + Clone,
{
    fn clone_box(&self) -> Box<dyn Actor> {
        Box::new(self.clone())
    }
}

trait ActorBuilder {
    fn get_default_config(&self) -> Config;
    fn create(&self, config: Config) -> Box<dyn Actor>;
}

// "Name(arg0,arg1,...)" 形式の文字列からActorを生成
// 省略した引数はデフォルト値
pub fn create_actor(exp: &str) -> Res<Box<dyn Actor>> {
    let builders: Vec<Box<dyn ActorBuilder>> = vec![
        Box::new(nop::NopBuilder {}),
        Box::new(random::RandomCpuBuilder {}),
    ];

    let (name, args): (&str, Vec<&str>) = match (exp.find('('), exp.rfind(')')) {
        (Some(l), Some(r)) if l < r => {
            let inner = &exp[l + 1..r];
            if inner.trim().is_empty() {
                (&exp[..l], vec![])
            } else {
                (&exp[..l], inner.split(',').collect())
            }
        }
        (None, None) => (exp, vec![]),
        _ => return Err(Error::InvalidConfig(format!("invalid paren: {}", exp))),
    };

    for b in &builders {
        let mut conf = b.get_default_config();
        if name != conf.name {
            continue;
        }
        if conf.args.len() < args.len() {
            return Err(Error::InvalidConfig(format!(
                "expected {} arguments for {}. but {} arguments are provided.",
                conf.args.len(),
                name,
                args.len(),
            )));
        }
        for (i, a) in args.iter().enumerate() {
            let a = a.trim();
            if !a.is_empty() {
                conf.args[i].value = conf.args[i].value.parse_as(a)?;
            }
        }
        return Ok(b.create(conf));
    }

    Err(Error::InvalidConfig(format!("unknown actor name: {}", name)))
}
