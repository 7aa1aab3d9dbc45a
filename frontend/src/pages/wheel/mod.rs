mod wheel_canvas;
mod wheel_utils;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent, SubmitEvent};
use yew::prelude::*;

use shared::animator::{Frame, SpinAnimator, SpinError};
use shared::history::{NewSpinRecord, SpinRecord};
use shared::rewind::{RewindError, RewindNavigator};
use shared::wheel::WheelState;

use crate::config::get_api_base_url;
use crate::styles;
use wheel_canvas::WheelCanvas;
use wheel_utils::{format_timestamp, random_colors, ResultDisplay, Rgb};

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Fire-and-forget persistence of a finished spin. Failures are logged and
/// never retried; the displayed winner is unaffected either way.
fn save_spin(winner: String, item_list: Vec<String>, navigator: Rc<RefCell<RewindNavigator>>) {
    spawn_local(async move {
        let body = NewSpinRecord { winner, item_list };
        let request = match Request::post(&format!("{}/history", get_api_base_url()))
            .header("Content-Type", "application/json")
            .json(&body)
        {
            Ok(request) => request,
            Err(error) => {
                log::error!("Failed to build save request: {:?}", error);
                return;
            }
        };

        match request.send().await {
            Ok(response) if response.ok() => match response.json::<SpinRecord>().await {
                Ok(saved) => {
                    log::info!("Spin saved: {}", saved.winner);
                    navigator.borrow_mut().record_spin(saved);
                }
                Err(error) => log::error!("Failed to parse saved spin: {:?}", error),
            },
            Ok(response) => {
                log::error!("Failed to save spin result: status {}", response.status())
            }
            Err(error) => log::error!("Failed to save spin result: {:?}", error),
        }
    });
}

#[function_component(WheelPage)]
pub fn wheel_page() -> Html {
    // Authoritative state lives in refs so the animation closure can mutate
    // it across frames; the use_state mirrors below only drive rendering.
    let wheel = use_mut_ref(WheelState::new);
    let animator = use_mut_ref(SpinAnimator::new);
    let navigator = use_mut_ref(RewindNavigator::new);

    let items_view = use_state(Vec::<String>::new);
    let colors = use_state(Vec::<Rgb>::new);
    let rotation_view = use_state(|| 0.0f64);
    let is_spinning = use_state(|| false);
    let result = use_state(String::new);

    let input_ref = use_node_ref();

    // Seed the rewind cache once at startup. A failed fetch leaves the cache
    // empty; rewinding then reports "no previous spins".
    {
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match Request::get(&format!("{}/history", get_api_base_url()))
                    .send()
                    .await
                {
                    Ok(response) if response.ok() => {
                        match response.json::<Vec<SpinRecord>>().await {
                            Ok(records) => navigator.borrow_mut().load(records),
                            Err(error) => {
                                log::error!("Failed to parse spin history: {:?}", error)
                            }
                        }
                    }
                    Ok(response) => {
                        log::error!("Failed to load spin history: status {}", response.status())
                    }
                    Err(error) => log::error!("Failed to load spin history: {:?}", error),
                }
            });
            || ()
        });
    }

    let on_add = {
        let wheel = wheel.clone();
        let items_view = items_view.clone();
        let colors = colors.clone();
        let is_spinning = is_spinning.clone();
        let input_ref = input_ref.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *is_spinning {
                return;
            }
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let name = input.value().trim().to_string();
            if name.is_empty() {
                return;
            }
            input.set_value("");

            wheel.borrow_mut().push_item(name);
            let snapshot = wheel.borrow().items().to_vec();
            colors.set(random_colors(snapshot.len()));
            items_view.set(snapshot);
        })
    };

    let on_delete = {
        let wheel = wheel.clone();
        let items_view = items_view.clone();
        let colors = colors.clone();
        let is_spinning = is_spinning.clone();
        let result = result.clone();

        Callback::from(move |_: MouseEvent| {
            if *is_spinning {
                return;
            }
            if wheel.borrow_mut().pop_item().is_none() {
                alert("No items to delete!");
                return;
            }
            let snapshot = wheel.borrow().items().to_vec();
            if snapshot.is_empty() {
                result.set(String::new());
            }
            colors.set(random_colors(snapshot.len()));
            items_view.set(snapshot);
        })
    };

    let on_spin = {
        let wheel = wheel.clone();
        let animator = animator.clone();
        let navigator = navigator.clone();
        let rotation_view = rotation_view.clone();
        let is_spinning = is_spinning.clone();
        let result = result.clone();

        Callback::from(move |_: MouseEvent| {
            if *is_spinning {
                return;
            }

            let mut rng = SmallRng::from_entropy();
            if let Err(SpinError::NoItems) = animator.borrow_mut().spin(&wheel.borrow(), &mut rng)
            {
                alert("Add at least one name before spinning!");
                return;
            }

            is_spinning.set(true);
            result.set("Spinning...".to_string());

            let wheel = wheel.clone();
            let animator = animator.clone();
            let navigator = navigator.clone();
            let rotation_view = rotation_view.clone();
            let is_spinning = is_spinning.clone();
            let result = result.clone();

            // One animator step per animation frame; the closure re-schedules
            // itself until the animator reports the final frame.
            let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
            let g = f.clone();

            *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let frame = animator.borrow_mut().step(&mut wheel.borrow_mut());
                match frame {
                    Some(Frame::Moving { .. }) => {
                        rotation_view.set(wheel.borrow().current_deg());
                        if let Some(window) = web_sys::window() {
                            let _ = window.request_animation_frame(
                                f.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                            );
                        }
                    }
                    Some(Frame::Finished { winner, item_list }) => {
                        rotation_view.set(wheel.borrow().current_deg());
                        is_spinning.set(false);
                        result.set(format!("🎉 Winner: {} 🎉", winner));
                        save_spin(winner, item_list, navigator.clone());
                    }
                    None => {}
                }
            }) as Box<dyn FnMut()>));

            if let Some(window) = web_sys::window() {
                let _ = window.request_animation_frame(
                    g.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                );
            }
        })
    };

    let on_rewind = {
        let wheel = wheel.clone();
        let navigator = navigator.clone();
        let items_view = items_view.clone();
        let colors = colors.clone();
        let rotation_view = rotation_view.clone();
        let is_spinning = is_spinning.clone();
        let result = result.clone();

        Callback::from(move |_: MouseEvent| {
            if *is_spinning {
                return;
            }

            let outcome = navigator.borrow_mut().rewind().map(|record| record.clone());
            match outcome {
                Err(RewindError::Empty) => alert("No previous spins to rewind to."),
                Err(RewindError::OldestReached) => {
                    alert("You've reached the oldest spin in history.")
                }
                Ok(record) => {
                    let items = record.replay_items();
                    {
                        let mut state = wheel.borrow_mut();
                        state.replace_items(items.clone());
                        state.align_to(&record.winner);
                    }
                    colors.set(random_colors(items.len()));
                    rotation_view.set(wheel.borrow().current_deg());
                    items_view.set(items);
                    result.set(format!(
                        "⏪ Rewound to previous spin: {} ({})",
                        record.winner,
                        format_timestamp(&record.timestamp)
                    ));
                }
            }
        })
    };

    html! {
        <div class={styles::CONTAINER}>
            <div class="max-w-2xl mx-auto py-8">
                <h1 class={classes!(styles::TEXT_H1, "text-center", "mb-6")}>{"Spin the Wheel"}</h1>
                <div class={styles::CARD}>
                    <div class="flex justify-center mb-6">
                        <WheelCanvas
                            items={(*items_view).clone()}
                            colors={(*colors).clone()}
                            rotation={*rotation_view}
                        />
                    </div>

                    <ResultDisplay message={(*result).clone()} />

                    <form onsubmit={on_add} class="flex gap-2 mb-4">
                        <input ref={input_ref} class={styles::INPUT} placeholder="Enter a name" />
                        <button type="submit" class={styles::BUTTON_SECONDARY}>{"Add"}</button>
                    </form>

                    <div class="flex justify-center gap-3">
                        <button onclick={on_spin} disabled={*is_spinning} class={styles::BUTTON_PRIMARY}>
                            { if *is_spinning { "Spinning..." } else { "Spin" } }
                        </button>
                        <button onclick={on_delete} class={styles::BUTTON_DANGER}>{"Delete last"}</button>
                        <button onclick={on_rewind} class={styles::BUTTON_SECONDARY}>{"Rewind"}</button>
                    </div>
                </div>
            </div>
        </div>
    }
}
