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


use slf::LoggerFactory;
use slf::backend::stdio::StdioConfig;
use slf::backend::stdio::StdioLoggerFactory;
use slf::backend::stdio::TextLayout;

fn main() {
    let factory = StdioLoggerFactory::new(
        StdioConfig::default()
            .stdout()
            .filter("trace")
            .layout(TextLayout::default().no_color()),
    );

    let logger = factory.logger("demo");
    let err = std::io::Error::other("connection reset");

    slf::fatal!(logger, "Hello fatal!");
    slf::error!(logger, error = &err, "Hello error!");
    slf::warn!(logger, "Hello warn!");
    slf::info!(logger, "Hello info!");
    slf::debug!(logger, "Hello debug!");
    slf::trace!(logger, "Hello trace!");
}
