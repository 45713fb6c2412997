mod spin_flow;
pub mod wheel_canvas;
mod wheel_utils;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Interval;
use serde::de::DeserializeOwned;
use shared::catalog::Slice;
use shared::constants::*;
use shared::content::{ImageReference, TravelTip};
use shared::shared_wheel_game::*;
use uuid::Uuid;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::SliceLeaderboard;
use crate::config::api_url;
use spin_flow::{ContentPoll, PollOutcome, SpinGate, SETTLE_ATTEMPTS};
use wheel_canvas::{ease_out_cubic, WheelCanvas};
use wheel_utils::{ResultModal, SpinButton};

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

async fn read_json<T: DeserializeOwned>(request: Request) -> Result<T, String> {
    match request.send().await {
        Ok(response) => {
            if response.ok() {
                response
                    .json::<T>()
                    .await
                    .map_err(|e| format!("Error parsing response: {:?}", e))
            } else {
                Err(format!("Error status: {}", response.status()))
            }
        }
        Err(e) => Err(format!("Network error: {:?}", e)),
    }
}

async fn get_json<T: DeserializeOwned>(endpoint: &str) -> Result<T, String> {
    read_json(Request::get(&api_url(endpoint)).build().map_err(|e| e.to_string())?).await
}

async fn post_json<T: DeserializeOwned>(endpoint: &str) -> Result<T, String> {
    read_json(Request::post(&api_url(endpoint)).build().map_err(|e| e.to_string())?).await
}

async fn settle_spin() -> Result<WheelSettleResponse, String> {
    let mut attempt = 1;
    loop {
        match post_json::<WheelSettleResponse>(WHEEL_SETTLE_ENDPOINT).await {
            Ok(settled) => return Ok(settled),
            Err(e) if attempt < SETTLE_ATTEMPTS => {
                log::warn!("Settle attempt {} failed: {}", attempt, e);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn request_frame(frame: &FrameClosure) {
    if let (Some(window), Some(closure)) = (web_sys::window(), frame.borrow().as_ref()) {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

/// Eases the wheel from `from` to `to` degrees over `duration_ms`, one
/// `on_frame` per animation frame, then fires `on_done` once.
fn animate_rotation(from: f64, to: f64, duration_ms: f64, on_frame: Callback<f64>, on_done: Callback<()>) {
    let frame: FrameClosure = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let start_time = js_sys::Date::now();

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let elapsed = js_sys::Date::now() - start_time;
        let progress = if duration_ms > 0.0 { (elapsed / duration_ms).min(1.0) } else { 1.0 };
        on_frame.emit(from + (to - from) * ease_out_cubic(progress));

        if progress < 1.0 {
            request_frame(&next);
        } else {
            // Free the closure once it has returned
            let finished = next.clone();
            spawn_local(async move {
                finished.borrow_mut().take();
            });
            on_done.emit(());
        }
    }) as Box<dyn FnMut()>));

    request_frame(&frame);
}

#[function_component(LuckyWheel)]
pub fn lucky_wheel() -> Html {
    let catalog = use_state(Vec::<Slice>::new);
    let ready = use_state(|| false);
    let rotation = use_state(|| 0.0);
    let is_spinning = use_state(|| false);
    let error_message = use_state(String::new);

    let winner = use_state(|| None::<Slice>);
    let show_result = use_state(|| false);
    let pending_episode = use_state(|| None::<Uuid>);
    let last_episode = use_state(|| None::<Uuid>);
    let tip = use_state(|| None::<TravelTip>);
    let image = use_state(|| None::<ImageReference>);
    let content_error = use_state(|| None::<String>);
    // Episode whose content may still land in the modal
    let current_episode = use_mut_ref(|| None::<Uuid>);
    // State updates lag a render behind, so clicks check this instead
    let spin_gate = use_mut_ref(|| SpinGate::Open);

    // A page load starts a fresh session
    {
        let catalog = catalog.clone();
        let ready = ready.clone();
        let rotation = rotation.clone();
        let error_message = error_message.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match post_json::<WheelStateResponse>(WHEEL_RESET_ENDPOINT).await {
                    Ok(state) => rotation.set(state.rotation),
                    Err(e) => {
                        log::error!("Failed to reset wheel session: {}", e);
                        error_message.set(NETWORK_ERROR.to_string());
                        return;
                    }
                }

                match get_json::<Vec<Slice>>(CATALOG_ENDPOINT).await {
                    Ok(slices) => {
                        log::info!("Loaded {} wheel slices", slices.len());
                        catalog.set(slices);
                        ready.set(true);
                    }
                    Err(e) => {
                        log::error!("Failed to load catalog: {}", e);
                        error_message.set(NETWORK_ERROR.to_string());
                    }
                }
            });
            || ()
        });
    }

    // Poll for the current episode's content until it is ready
    {
        let pending_episode = pending_episode.clone();
        let tip = tip.clone();
        let image = image.clone();
        let content_error = content_error.clone();
        let current_episode = current_episode.clone();

        use_effect_with(*pending_episode, move |episode| {
            let interval = episode.map(|episode| {
                let poll = Rc::new(RefCell::new(ContentPoll::new(episode)));

                Interval::new(CONTENT_POLL_INTERVAL_MS, move || {
                    let pending_episode = pending_episode.clone();
                    let tip = tip.clone();
                    let image = image.clone();
                    let content_error = content_error.clone();
                    let current_episode = current_episode.clone();
                    let poll = poll.clone();

                    spawn_local(async move {
                        let result = get_json::<ContentResponse>(CONTENT_ENDPOINT).await;
                        if *current_episode.borrow() != Some(episode) {
                            return;
                        }
                        match result {
                            Ok(content) => {
                                let outcome = poll.borrow_mut().observe(&content);
                                match outcome {
                                    PollOutcome::Ready => {
                                        tip.set(content.tip);
                                        image.set(content.image);
                                        pending_episode.set(None);
                                    }
                                    PollOutcome::Lost => {
                                        *current_episode.borrow_mut() = None;
                                        content_error.set(Some(CONTENT_RETRY_MESSAGE.to_string()));
                                        pending_episode.set(None);
                                    }
                                    PollOutcome::Pending => {}
                                }
                            }
                            Err(e) => {
                                log::warn!("Content poll failed: {}", e);
                                content_error.set(Some(CONTENT_RETRY_MESSAGE.to_string()));
                                pending_episode.set(None);
                            }
                        }
                    });
                })
            });
            move || drop(interval)
        });
    }

    let start_spin = {
        let ready = ready.clone();
        let rotation = rotation.clone();
        let is_spinning = is_spinning.clone();
        let error_message = error_message.clone();
        let winner = winner.clone();
        let show_result = show_result.clone();
        let pending_episode = pending_episode.clone();
        let last_episode = last_episode.clone();
        let tip = tip.clone();
        let image = image.clone();
        let content_error = content_error.clone();
        let current_episode = current_episode.clone();
        let spin_gate = spin_gate.clone();

        Callback::from(move |_: MouseEvent| {
            if !*ready || !spin_gate.borrow_mut().try_close() {
                return;
            }

            is_spinning.set(true);
            error_message.set(String::new());
            let start_rotation = *rotation;

            let rotation = rotation.clone();
            let is_spinning = is_spinning.clone();
            let error_message = error_message.clone();
            let winner = winner.clone();
            let show_result = show_result.clone();
            let pending_episode = pending_episode.clone();
            let last_episode = last_episode.clone();
            let tip = tip.clone();
            let image = image.clone();
            let content_error = content_error.clone();
            let current_episode = current_episode.clone();
            let spin_gate = spin_gate.clone();

            spawn_local(async move {
                let spin = match post_json::<WheelSpinResponse>(WHEEL_SPIN_ENDPOINT).await {
                    Ok(spin) => spin,
                    Err(e) => {
                        log::error!("Spin request failed: {}", e);
                        spin_gate.borrow_mut().release();
                        is_spinning.set(false);
                        error_message.set(NETWORK_ERROR.to_string());
                        return;
                    }
                };

                if !spin.success {
                    // Another spin is still settling server-side
                    spin_gate.borrow_mut().release();
                    is_spinning.set(false);
                    error_message.set(spin.message.unwrap_or_else(|| ALREADY_SPINNING_MESSAGE.to_string()));
                    return;
                }

                let on_frame = {
                    let rotation = rotation.clone();
                    Callback::from(move |angle: f64| rotation.set(angle))
                };

                let on_done = Callback::from(move |_: ()| {
                    let is_spinning = is_spinning.clone();
                    let error_message = error_message.clone();
                    let winner = winner.clone();
                    let show_result = show_result.clone();
                    let pending_episode = pending_episode.clone();
                    let last_episode = last_episode.clone();
                    let tip = tip.clone();
                    let image = image.clone();
                    let content_error = content_error.clone();
                    let current_episode = current_episode.clone();
                    let spin_gate = spin_gate.clone();

                    spawn_local(async move {
                        let settled = settle_spin().await;
                        is_spinning.set(false);

                        match settled {
                            Ok(settled) => {
                                spin_gate.borrow_mut().release();
                                *current_episode.borrow_mut() = Some(settled.episode);
                                tip.set(None);
                                image.set(None);
                                content_error.set(None);
                                winner.set(Some(settled.winner));
                                show_result.set(true);
                                pending_episode.set(Some(settled.episode));
                                last_episode.set(Some(settled.episode));
                            }
                            Err(e) => {
                                log::error!("Settle request failed: {}", e);
                                let server_spinning = get_json::<WheelStateResponse>(WHEEL_STATE_ENDPOINT)
                                    .await
                                    .map(|state| state.is_spinning)
                                    .ok();
                                spin_gate.borrow_mut().settle_failed(server_spinning);
                                let message = if *spin_gate.borrow() == SpinGate::Stuck {
                                    RELOAD_MESSAGE
                                } else {
                                    NETWORK_ERROR
                                };
                                error_message.set(message.to_string());
                            }
                        }
                    });
                });

                animate_rotation(start_rotation, spin.rotation, f64::from(spin.duration_ms), on_frame, on_done);
            });
        })
    };

    let close_result = {
        let show_result = show_result.clone();
        let pending_episode = pending_episode.clone();
        let tip = tip.clone();
        let image = image.clone();
        let current_episode = current_episode.clone();

        Callback::from(move |_: MouseEvent| {
            *current_episode.borrow_mut() = None;
            show_result.set(false);
            pending_episode.set(None);
            tip.set(None);
            image.set(None);

            spawn_local(async {
                if let Err(e) = post_json::<ContentResponse>(CONTENT_DISMISS_ENDPOINT).await {
                    log::warn!("Failed to dismiss content: {}", e);
                }
            });
        })
    };

    html! {
        <div class="container mx-auto px-4 py-8 max-w-3xl">
            <h1 class="text-3xl font-bold mb-2 text-center text-gray-900 dark:text-white">
                <span class="bg-clip-text text-transparent bg-gradient-to-r from-yellow-400 to-orange-500">{"上海周末溜达去哪儿"}</span>
            </h1>
            <p class="text-center text-gray-500 dark:text-gray-400 mb-6">{"转一转，让幸运轮盘帮你决定"}</p>

            <div class="bg-white dark:bg-gray-800 p-6 sm:p-8 rounded-2xl shadow-xl max-w-2xl mx-auto border border-gray-100 dark:border-gray-700">
                <div class="relative mx-auto mb-8 flex justify-center items-center">
                    <div class="w-full max-w-[450px] mx-auto">
                        <WheelCanvas slices={(*catalog).clone()} rotation={*rotation} is_spinning={*is_spinning} />
                    </div>
                </div>

                if !(*error_message).is_empty() {
                    <div class="mb-6 text-center">
                        <p class="text-red-500 bg-red-50 dark:bg-red-900/20 p-3 rounded-lg">{&*error_message}</p>
                    </div>
                }

                <div class="flex justify-center mt-4">
                    <div class="w-full max-w-[300px]">
                        <SpinButton is_spinning={*is_spinning} disabled={!*ready || *spin_gate.borrow() == SpinGate::Stuck} onclick={start_spin} />
                    </div>
                </div>
            </div>

            if *ready {
                <SliceLeaderboard refresh={*last_episode} />
            }

            if *show_result {
                if let Some(winner) = (*winner).clone() {
                    <ResultModal
                        winner={winner}
                        loading={pending_episode.is_some()}
                        tip={(*tip).clone()}
                        image={(*image).clone()}
                        error={(*content_error).clone()}
                        on_close={close_result}
                    />
                }
            }

            <footer class="mt-12 text-center text-xs text-gray-400 dark:text-gray-500">
                {"由 Gemini AI 驱动 • 推荐内容仅供参考"}
            </footer>
        </div>
    }
}
