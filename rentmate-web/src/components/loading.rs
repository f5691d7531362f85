use yew::{Html, function_component, html};

#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center h-full animate-fadeIn">
            <div class="bg-base-200 p-6 rounded-lg shadow-md flex flex-col items-center">
                <div class="text-xl font-medium flex items-center gap-2">
                    <i class="fas fa-house text-primary"></i>
                    <span>{"Rentmate"}</span>
                </div>
                <div class="mt-3 flex items-center">
                    <span class="loading loading-dots loading-md"></span>
                </div>
            </div>
        </div>
    }
}
