use yew::prelude::*;

/// Static gradient blobs behind the card. Pure markup, no state.
#[function_component(BackgroundParticles)]
pub fn background_particles() -> Html {
    html! {
        <div class="background-particles" aria-hidden="true">
            <div class="blob blob-blue"></div>
            <div class="blob blob-purple"></div>
            <div class="blob blob-cyan"></div>
            <div class="grid-overlay"></div>
        </div>
    }
}
