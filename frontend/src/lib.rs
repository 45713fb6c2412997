pub mod components;
pub mod config;
pub mod pages;
pub mod styles;

use yew::prelude::*;

use crate::pages::wheel::LuckyWheel;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="min-h-screen w-full bg-gray-50 dark:bg-gray-900">
            <div class="mx-auto">
                <LuckyWheel />
            </div>
        </div>
    }
}
