// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use slf::Level;
use slf::Listener;
use slf::LoggerFactory;

fn main() {
    let factories = slf::load_factories();
    for factory in &factories {
        println!("discovered backend: {}", factory.name());
    }

    let factory = &factories[0];
    factory.register_listener(Listener::new(|event| {
        println!("listener saw: {}", event.to_owned());
    }));

    let logger = factory.logger("demo");
    slf::info!(logger, "Hello {0}", "World!");
    slf::log!(logger, Level::Warning, "running with {} backend(s)", factories.len());
}
