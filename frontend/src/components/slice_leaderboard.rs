use gloo_net::http::Request;
use shared::constants::LEADERBOARD_ENDPOINT;
use shared::ranking::LeaderboardEntry;
use uuid::Uuid;
use yew::prelude::*;

use crate::config::api_url;
use crate::pages::wheel::wheel_canvas::icon_glyph;

#[derive(Properties, PartialEq)]
pub struct SliceLeaderboardProps {
    /// Last settled episode; every change triggers a refetch.
    pub refresh: Option<Uuid>,
}

#[function_component(SliceLeaderboard)]
pub fn slice_leaderboard(props: &SliceLeaderboardProps) -> Html {
    let leaderboard = use_state(Vec::<LeaderboardEntry>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let leaderboard = leaderboard.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with(props.refresh, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match Request::get(&api_url(LEADERBOARD_ENDPOINT)).send().await {
                    Ok(response) => {
                        if response.status() == 200 {
                            match response.json::<Vec<LeaderboardEntry>>().await {
                                Ok(data) => {
                                    leaderboard.set(data);
                                    error.set(None);
                                }
                                Err(e) => {
                                    log::error!("Failed to parse leaderboard data: {:?}", e);
                                    error.set(Some("Failed to parse leaderboard data".to_string()));
                                }
                            }
                        } else {
                            error.set(Some(format!("Server returned status: {}", response.status())));
                        }
                    }
                    Err(e) => {
                        log::error!("Failed to fetch leaderboard: {:?}", e);
                        error.set(Some("Failed to fetch leaderboard data".to_string()));
                    }
                }

                loading.set(false);
            });

            || ()
        });
    }

    html! {
        <div class="w-full mt-10">
            <h2 class="text-2xl font-bold text-gray-900 dark:text-white mb-4 text-center">{"🏆 人气排行"}</h2>
            {if *loading {
                html! {
                    <div class="flex justify-center items-center p-12">
                        <div class="animate-spin rounded-full h-16 w-16 border-t-4 border-b-4 border-purple-500"></div>
                    </div>
                }
            } else if let Some(err) = &*error {
                html! {
                    <div class="bg-red-50 dark:bg-red-900/30 border border-red-200 dark:border-red-700 rounded-lg p-6 text-center max-w-md mx-auto">
                        <p class="text-red-500 dark:text-red-300">{err}</p>
                    </div>
                }
            } else {
                html! {
                    <div class="bg-white/80 dark:bg-gray-800/80 backdrop-blur-sm shadow-xl rounded-xl overflow-hidden border border-gray-100 dark:border-gray-700">
                        <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                            <thead class="bg-gray-50 dark:bg-gray-700/70">
                                <tr>
                                    <th scope="col" class="px-4 py-3 text-center text-xs font-bold text-gray-500 dark:text-gray-300 uppercase tracking-wider">{"排名"}</th>
                                    <th scope="col" class="px-4 py-3 text-left text-xs font-bold text-gray-500 dark:text-gray-300 uppercase tracking-wider">{"地点"}</th>
                                    <th scope="col" class="px-4 py-3 text-center text-xs font-bold text-gray-500 dark:text-gray-300 uppercase tracking-wider">{"评分"}</th>
                                    <th scope="col" class="px-4 py-3 text-center text-xs font-bold text-gray-500 dark:text-gray-300 uppercase tracking-wider">{"被选中"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for leaderboard.iter().map(|entry| {
                                    let (bg_class, badge) = match entry.rank {
                                        1 if entry.wins > 0 => ("bg-yellow-50 dark:bg-yellow-900/20", "🥇"),
                                        2 if entry.wins > 0 => ("bg-gray-50 dark:bg-gray-700/30", "🥈"),
                                        3 if entry.wins > 0 => ("bg-amber-50 dark:bg-amber-900/20", "🥉"),
                                        _ => ("", ""),
                                    };

                                    html! {
                                        <tr class={classes!("transition-colors", "duration-200", "hover:bg-gray-50", "dark:hover:bg-gray-700/50", bg_class)}>
                                            <td class="px-4 py-3 whitespace-nowrap text-center text-sm font-semibold text-gray-700 dark:text-gray-200">
                                                {if badge.is_empty() { entry.rank.to_string() } else { badge.to_string() }}
                                            </td>
                                            <td class="px-4 py-3 whitespace-nowrap text-sm text-gray-900 dark:text-white">
                                                <span class="mr-2">{icon_glyph(&entry.slice.icon)}</span>
                                                {&entry.slice.name}
                                            </td>
                                            <td class="px-4 py-3 whitespace-nowrap text-center text-sm text-gray-600 dark:text-gray-300">
                                                {format!("{:.1}", entry.slice.rating)}
                                            </td>
                                            <td class="px-4 py-3 whitespace-nowrap text-center text-sm font-bold text-blue-600 dark:text-blue-400">
                                                {entry.wins}
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </div>
    }
}
