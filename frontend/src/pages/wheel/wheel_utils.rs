use shared::catalog::Slice;
use shared::content::{ImageReference, TravelTip};
use yew::prelude::*;

use super::wheel_canvas::icon_glyph;
use crate::styles;

// Spin button component
#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub disabled: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_text = if props.is_spinning { "正在旋转..." } else { "开始抽奖" };
    let is_disabled = props.is_spinning || props.disabled;

    let button_class = if is_disabled {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0"
    };

    let spin_icon_class = if props.is_spinning {
        "inline-block mr-2 animate-spin"
    } else {
        "hidden"
    };

    html! {
        <div class={classes!("relative", "overflow-hidden", "rounded-full", "w-full", button_class)}>
            <button
                onclick={props.onclick.clone()}
                disabled={is_disabled}
                class="relative w-full px-8 py-4 font-bold text-lg transition-all duration-300 focus:outline-none focus:ring-4 focus:ring-yellow-300 focus:ring-opacity-50 bg-transparent"
            >
                <div class="flex items-center justify-center">
                    <svg class={spin_icon_class} xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                        <circle cx="12" cy="12" r="10" />
                        <path d="M12 6v6l4 2" />
                    </svg>
                    <span>{button_text}</span>
                </div>
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultModalProps {
    pub winner: Slice,
    pub loading: bool,
    pub tip: Option<TravelTip>,
    pub image: Option<ImageReference>,
    pub error: Option<String>,
    pub on_close: Callback<MouseEvent>,
}

/// Winner card shown after the wheel stops. Shows a loading state until the
/// content for the current episode has arrived.
#[function_component(ResultModal)]
pub fn result_modal(props: &ResultModalProps) -> Html {
    let winner = &props.winner;

    let image = match &props.image {
        Some(image) => html! {
            <div class="relative mb-4 overflow-hidden rounded-xl aspect-video bg-gray-100 dark:bg-gray-700">
                <img src={image.uri.clone()} alt={winner.name.clone()} class="w-full h-full object-cover" />
                if image.generated {
                    <span class="absolute top-2 right-2 px-2 py-1 text-xs font-semibold rounded-full bg-purple-600/90 text-white">
                        {"✨ AI 生成"}
                    </span>
                }
            </div>
        },
        None => html! {},
    };

    let body = if props.loading {
        html! {
            <div class="flex flex-col items-center py-8">
                <div class={styles::LOADING_SPINNER}></div>
                <p class={classes!(styles::TEXT_SMALL, "mt-4")}>{"正在为你生成出行建议..."}</p>
            </div>
        }
    } else if let Some(tip) = &props.tip {
        html! {
            <>
                {image}
                <p class={classes!(styles::TEXT_BODY, "mb-4")}>{&tip.description}</p>
                <div class="mb-4 p-3 rounded-lg bg-amber-50 dark:bg-amber-900/20 text-amber-800 dark:text-amber-200 text-sm">
                    <span class="font-semibold">{"小贴士："}</span>{&tip.pro_tip}
                </div>
                <h4 class="font-semibold text-gray-900 dark:text-white mb-2">{"推荐打卡"}</h4>
                <ul class="flex flex-wrap gap-2">
                    {for tip.attractions.iter().map(|attraction| html! {
                        <li class="px-3 py-1 rounded-full bg-gray-100 dark:bg-gray-700 text-sm text-gray-700 dark:text-gray-200">
                            {attraction}
                        </li>
                    })}
                </ul>
            </>
        }
    } else if let Some(error) = &props.error {
        html! { <p class={styles::TEXT_ERROR}>{error}</p> }
    } else {
        html! {}
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 backdrop-blur-sm px-4">
            <div class={classes!(styles::CARD, "w-full", "max-w-lg", "max-h-[90vh]", "overflow-y-auto")}>
                <div class="flex items-center justify-between mb-4">
                    <div class="flex items-center">
                        <span
                            class="flex h-10 w-10 items-center justify-center rounded-full mr-3 text-xl"
                            style={format!("background-color: {}; color: {};", winner.color, winner.text_color)}
                        >
                            {icon_glyph(&winner.icon)}
                        </span>
                        <div>
                            <div class={styles::TEXT_SMALL}>{"这个周末去"}</div>
                            <h3 class={styles::TEXT_H3}>{&winner.name}</h3>
                        </div>
                    </div>
                    <button onclick={props.on_close.clone()} class={styles::BUTTON_ICON} aria-label="close">{"✕"}</button>
                </div>
                {body}
                <div class="mt-6 flex justify-end">
                    <button onclick={props.on_close.clone()} class={styles::BUTTON_PRIMARY}>{"知道了"}</button>
                </div>
            </div>
        </div>
    }
}
