use crate::audio::WebAudio;
use crate::utils::js_random_seed;
use clap::Args;
use gloo::timers::callback::Interval;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_time::Instant;
use whack_core as game;
use yew::prelude::*;

/// How often the browser clock is fed into the round scheduler.
const CLOCK_RESOLUTION_MS: u32 = 50;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Single mole at a time, whacked moles vanish instantly
    #[arg(long)]
    pub(crate) classic: bool,
}

impl GameProps {
    fn round_config(&self) -> game::RoundConfig {
        if self.classic {
            game::RoundConfig::classic()
        } else {
            game::RoundConfig::default()
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start,
    Whack(game::HoleIndex),
    UpdateTime,
}

fn hole_classes(hole: game::Hole) -> Classes {
    classes!(
        "mole",
        hole.visible.then_some("visible"),
        hole.hit.then_some("whacked")
    )
}

fn verdict_message(verdict: game::Verdict) -> &'static str {
    match verdict {
        game::Verdict::Won => "恭喜你，贏得遊戲！",
        game::Verdict::TimeUp => "時間到，遊戲結束！",
    }
}

#[derive(Properties, Clone, PartialEq)]
struct MoleProps {
    index: game::HoleIndex,
    hole: game::Hole,
    callback: Callback<game::HoleIndex>,
}

#[function_component(MoleView)]
fn mole_component(props: &MoleProps) -> Html {
    let MoleProps {
        index,
        hole,
        callback,
    } = props.clone();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("hole {} clicked", index);
        callback.emit(index);
    });

    let has_hair = hole.variant.has_hair();
    html! {
        <div class={hole_classes(hole)} {onclick}>
            if hole.visible {
                <div class={classes!("mole-image", if has_hair { "mole-hairy" } else { "mole-bald" })}>
                    {if has_hair { "👨" } else { "👨‍🦲" }}
                </div>
            }
        </div>
    }
}

pub(crate) struct GameView {
    driver: game::RoundDriver<SmallRng, WebAudio>,
    epoch: Instant,
    _clock: Interval,
}

impl GameView {
    fn create_clock(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(CLOCK_RESOLUTION_MS, move || link.send_message(Msg::UpdateTime))
    }

    fn elapsed_ms(&self) -> game::Millis {
        self.epoch.elapsed().as_millis().try_into().unwrap_or(game::Millis::MAX)
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        Self {
            driver: game::RoundDriver::new(
                props.round_config(),
                SmallRng::seed_from_u64(seed),
                WebAudio::load(),
            )
            .expect("built-in round configs must be valid"),
            epoch: Instant::now(),
            _clock: GameView::create_clock(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let now = self.elapsed_ms();
        match msg {
            Start => {
                self.driver.advance_to(now);
                self.driver.start();
                true
            }
            Whack(index) => {
                // let timers that are already due fire before the click lands
                let ticked = self.driver.advance_to(now);
                self.driver.click(index).has_update() || ticked
            }
            UpdateTime => self.driver.advance_to(now),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use game::Phase;

        let snapshot = self.driver.snapshot();
        let cb_start = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Start
        });
        let cb_whack = ctx.link().callback(Msg::Whack);

        html! {
            <div class="App">
                <div class="game-container">
                    <h1>{"扑傻瓜"}</h1>
                    <div class="info">
                        <span>{format!("分數: {}", snapshot.score)}</span>
                        <span>{format!("時間: {}", snapshot.time_left)}</span>
                    </div>
                    if let Some(verdict) = snapshot.verdict {
                        <div class="game-over">
                            <h2>{verdict_message(verdict)}</h2>
                            <p>{format!("最終分數: {}", snapshot.score)}</p>
                            <button onclick={cb_start.clone()}>{"重新開始"}</button>
                        </div>
                    }
                    if snapshot.phase == Phase::Idle {
                        <button onclick={cb_start}>{"開始遊戲"}</button>
                    }
                    if snapshot.phase == Phase::Playing {
                        <div class="mole-grid">
                            {
                                for snapshot.holes.iter().copied().enumerate().map(|(index, hole)| html! {
                                    <MoleView key={index} {index} {hole} callback={cb_whack.clone()}/>
                                })
                            }
                        </div>
                    }
                </div>
            </div>
        }
    }
}
