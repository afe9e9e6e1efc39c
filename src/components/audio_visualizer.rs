use yew::prelude::*;

/// Five staggered equalizer bars shown while the store redirect is underway.
#[function_component(AudioVisualizer)]
pub fn audio_visualizer() -> Html {
    html! {
        <div class="audio-visualizer">
            {
                (0..5).map(|i| {
                    let style = format!("animation-delay: {}s;", i as f32 * 0.1);
                    html! { <div class="audio-bar" style={style}></div> }
                }).collect::<Html>()
            }
        </div>
    }
}
